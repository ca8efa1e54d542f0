//! Cache-busting query names.
//!
//! Every probe asks for `<random-label>.<domain>`, a name no resolver on the
//! path can have cached, so the measured time is a real round-trip to the
//! authoritative server.

use crate::validators::MAX_NAME_LEN;

/// Length of the random label when the domain leaves enough room.
pub const PROBE_LABEL_LEN: usize = 12;

const LABEL_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub struct ProbeNameGenerator;

impl ProbeNameGenerator {
    /// Builds a random subdomain of `domain`.
    ///
    /// The label shrinks when the full name would exceed 253 octets. A domain
    /// already at the limit is returned unchanged.
    pub fn generate(domain: &str) -> String {
        Self::generate_with(domain, &mut fastrand::Rng::new())
    }

    pub fn generate_with(domain: &str, rng: &mut fastrand::Rng) -> String {
        let domain = domain.trim_end_matches('.');
        let room = MAX_NAME_LEN.saturating_sub(domain.len() + 1);
        let label_len = PROBE_LABEL_LEN.min(room);

        if label_len == 0 {
            return domain.to_string();
        }

        let mut name = String::with_capacity(label_len + 1 + domain.len());
        for _ in 0..label_len {
            let idx = rng.usize(..LABEL_ALPHABET.len());
            name.push(LABEL_ALPHABET[idx] as char);
        }
        name.push('.');
        name.push_str(domain);
        name
    }
}
