use super::exchange::query_server;
use super::forwarding::{DnsResponse, ResponseParser};
use super::system_resolver::SystemResolverConfig;
use async_trait::async_trait;
use dnsperf_application::ports::NameserverDiscovery;
use dnsperf_domain::{DomainError, Nameserver};
use futures::future::join_all;
use hickory_proto::rr::{Name, RecordType};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Finds a domain's authoritative nameservers through the configured
/// recursive resolvers.
pub struct RecursiveNameserverDiscovery {
    resolvers: Vec<SocketAddr>,
    timeout: Duration,
    ipv6: bool,
}

impl RecursiveNameserverDiscovery {
    pub fn new(config: SystemResolverConfig, timeout: Duration) -> Self {
        Self {
            resolvers: config.resolvers,
            timeout,
            ipv6: false,
        }
    }

    pub fn with_ipv6(mut self, ipv6: bool) -> Self {
        self.ipv6 = ipv6;
        self
    }

    /// Asks each resolver in turn until one gives a usable answer.
    ///
    /// Transport failures and SERVFAIL/REFUSED move on to the next resolver;
    /// NOERROR and NXDOMAIN are answers.
    async fn recursive_query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let mut last_error = None;

        for &resolver in &self.resolvers {
            match query_server(resolver, name, record_type, true, self.timeout).await {
                Ok(result) if result.response.is_server_error() => {
                    debug!(
                        resolver = %resolver,
                        name = %name,
                        rcode = ResponseParser::rcode_to_status(result.response.rcode),
                        "Resolver returned server error, trying next"
                    );
                    last_error = Some(DomainError::NoResponse(format!(
                        "{} answered {}",
                        resolver,
                        ResponseParser::rcode_to_status(result.response.rcode)
                    )));
                }
                Ok(result) => return Ok(result.response),
                Err(e) => {
                    debug!(resolver = %resolver, name = %name, error = %e, "Resolver query failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| DomainError::ResolverConfig("no resolvers configured".to_string())))
    }

    /// Addresses for one NS target, glue first.
    async fn resolve_nameserver(&self, target: &Name, glue: Vec<IpAddr>) -> Option<Nameserver> {
        let hostname = display_name(target);

        let mut addresses: Vec<IpAddr> = glue
            .into_iter()
            .filter(|ip| self.ipv6 || ip.is_ipv4())
            .collect();

        if addresses.is_empty() {
            let target = target.to_utf8();
            let mut lookups = vec![self.recursive_query(&target, RecordType::A)];
            if self.ipv6 {
                lookups.push(self.recursive_query(&target, RecordType::AAAA));
            }

            for result in join_all(lookups).await {
                match result {
                    Ok(response) => addresses.extend(response.addresses),
                    Err(e) => {
                        debug!(nameserver = %hostname, error = %e, "Address lookup failed");
                    }
                }
            }
            addresses.retain(|ip| self.ipv6 || ip.is_ipv4());
        }

        if addresses.is_empty() {
            warn!(nameserver = %hostname, "Nameserver has no usable address, dropping");
            return None;
        }

        addresses.dedup();
        Some(Nameserver::new(hostname, addresses))
    }
}

#[async_trait]
impl NameserverDiscovery for RecursiveNameserverDiscovery {
    #[instrument(skip(self))]
    async fn discover(&self, domain: &str) -> Result<Vec<Nameserver>, DomainError> {
        let response = self.recursive_query(domain, RecordType::NS).await?;

        if response.is_nxdomain() {
            return Err(DomainError::NoNameservers(format!("{} (NXDOMAIN)", domain)));
        }
        if response.nameservers.is_empty() {
            return Err(DomainError::NoNameservers(domain.to_string()));
        }

        let lookups = response
            .nameservers
            .iter()
            .map(|target| self.resolve_nameserver(target, response.glue_for(target)));

        let nameservers: Vec<Nameserver> = join_all(lookups).await.into_iter().flatten().collect();

        debug!(
            domain = %domain,
            delegated = response.nameservers.len(),
            usable = nameservers.len(),
            "NS set resolved"
        );

        Ok(nameservers)
    }
}

fn display_name(name: &Name) -> String {
    name.to_utf8().trim_end_matches('.').to_string()
}
