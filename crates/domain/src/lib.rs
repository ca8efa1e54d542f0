//! dnsperf Domain Layer
pub mod config;
pub mod domain_stats;
pub mod errors;
pub mod measurement;
pub mod nameserver;
pub mod probe_name;
pub mod validators;

pub use config::{CliOverrides, Config, ConfigError};
pub use domain_stats::{DomainStats, StatsAccumulator};
pub use errors::DomainError;
pub use measurement::{Latency, Measurement, ProbeOutcome};
pub use nameserver::Nameserver;
pub use probe_name::ProbeNameGenerator;
