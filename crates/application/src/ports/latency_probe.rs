use async_trait::async_trait;
use dnsperf_domain::{DomainError, Nameserver, ProbeOutcome};

#[async_trait]
pub trait LatencyProbe: Send + Sync {
    /// Times one A query for `query_name` sent directly to `nameserver`.
    async fn measure(
        &self,
        nameserver: &Nameserver,
        query_name: &str,
    ) -> Result<ProbeOutcome, DomainError>;
}
