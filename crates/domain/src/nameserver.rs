use std::net::IpAddr;
use std::sync::Arc;

/// An authoritative nameserver as delegated by a domain's NS record set.
///
/// Rediscovered on every pass; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nameserver {
    pub hostname: Arc<str>,
    pub addresses: Vec<IpAddr>,
}

impl Nameserver {
    pub fn new(hostname: impl Into<Arc<str>>, addresses: Vec<IpAddr>) -> Self {
        Self {
            hostname: hostname.into(),
            addresses,
        }
    }
}
