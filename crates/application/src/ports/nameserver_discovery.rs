use async_trait::async_trait;
use dnsperf_domain::{DomainError, Nameserver};

#[async_trait]
pub trait NameserverDiscovery: Send + Sync {
    /// Returns the domain's authoritative nameservers in delegation order.
    ///
    /// Nameservers whose addresses could not be resolved are left out; an
    /// error means the NS lookup itself failed.
    async fn discover(&self, domain: &str) -> Result<Vec<Nameserver>, DomainError>;
}
