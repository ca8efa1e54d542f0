use async_trait::async_trait;
use dnsperf_domain::{DomainError, DomainStats};

/// One summary row per domain, overwritten in place.
#[async_trait]
pub trait DomainStatsRepository: Send + Sync {
    /// Creates an empty row for each domain that has none yet.
    async fn seed(&self, domains: &[String]) -> Result<u64, DomainError>;

    async fn upsert(&self, stats: &DomainStats) -> Result<(), DomainError>;

    async fn get(&self, domain: &str) -> Result<Option<DomainStats>, DomainError>;

    async fn get_all(&self) -> Result<Vec<DomainStats>, DomainError>;

    async fn clear(&self) -> Result<u64, DomainError>;
}
