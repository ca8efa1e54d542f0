pub mod domain_stats_repository;
pub mod measurement_repository;

pub use domain_stats_repository::SqliteDomainStatsRepository;
pub use measurement_repository::SqliteMeasurementRepository;

use crate::database::DB_TIMESTAMP_FORMAT;
use chrono::{DateTime, NaiveDateTime, Utc};
use dnsperf_domain::DomainError;

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(DB_TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DomainError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| DomainError::DatabaseError(format!("Bad timestamp '{}': {}", value, e)))
}
