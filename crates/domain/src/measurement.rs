use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Round-trip time of one authoritative query, in microseconds.
///
/// Always strictly positive: a zero duration is not a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Latency(u64);

impl Latency {
    pub fn from_micros(micros: u64) -> Result<Self, DomainError> {
        if micros == 0 {
            return Err(DomainError::InvalidLatency(
                "latency must be greater than zero".to_string(),
            ));
        }
        Ok(Self(micros))
    }

    pub fn from_duration(elapsed: Duration) -> Result<Self, DomainError> {
        let micros = u64::try_from(elapsed.as_micros()).map_err(|_| {
            DomainError::InvalidLatency(format!("{:?} does not fit in microseconds", elapsed))
        })?;
        Self::from_micros(micros)
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_millis_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

/// One successful timed query against one authoritative nameserver.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: Option<i64>,
    pub domain: Arc<str>,
    pub nameserver: Arc<str>,
    pub latency: Latency,
    pub observed_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl Measurement {
    pub fn new(
        domain: impl Into<Arc<str>>,
        nameserver: impl Into<Arc<str>>,
        latency: Latency,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            domain: domain.into(),
            nameserver: nameserver.into(),
            latency,
            observed_at,
            note: None,
        }
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

/// Result of a single probe, before it is turned into a [`Measurement`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub latency: Latency,
    /// Responding address, for diagnostics.
    pub responder: Option<std::net::IpAddr>,
    pub note: Option<String>,
}

impl ProbeOutcome {
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            responder: None,
            note: None,
        }
    }
}
