use async_trait::async_trait;
use dnsperf_domain::{DomainError, Measurement};

/// Append-only measurement log.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Appends one measurement and returns its row id.
    async fn append(&self, measurement: &Measurement) -> Result<i64, DomainError>;

    /// All measurements recorded for `domain`, oldest first.
    async fn list_for_domain(&self, domain: &str) -> Result<Vec<Measurement>, DomainError>;

    async fn count_for_domain(&self, domain: &str) -> Result<u64, DomainError>;

    /// Drops the whole log. Only used by an explicit database reset.
    async fn clear(&self) -> Result<u64, DomainError>;
}
