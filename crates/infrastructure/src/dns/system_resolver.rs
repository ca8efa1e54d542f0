use dnsperf_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tracing::{debug, info};

const DNS_PORT: u16 = 53;

/// The recursive resolvers nameserver discovery goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemResolverConfig {
    pub resolvers: Vec<SocketAddr>,
}

impl SystemResolverConfig {
    /// Uses `bootstrap` when non-empty, otherwise the `nameserver` lines of
    /// the resolv.conf file at `path`.
    pub fn load(path: &str, bootstrap: Vec<SocketAddr>) -> Result<Self, DomainError> {
        if !bootstrap.is_empty() {
            info!(resolvers = ?bootstrap, "Using configured bootstrap resolvers");
            return Ok(Self {
                resolvers: bootstrap,
            });
        }

        let content = std::fs::read(Path::new(path)).map_err(|e| {
            DomainError::ResolverConfig(format!("Failed to read {}: {}", path, e))
        })?;

        let config = Self::parse(&content)
            .map_err(|e| DomainError::ResolverConfig(format!("{}: {}", path, e)))?;

        info!(path = %path, resolvers = ?config.resolvers, "Loaded system resolvers");
        Ok(config)
    }

    pub fn parse(content: &[u8]) -> Result<Self, String> {
        let parsed = resolv_conf::Config::parse(content)
            .map_err(|e| format!("invalid resolv.conf: {}", e))?;

        let resolvers: Vec<SocketAddr> = parsed
            .nameservers
            .iter()
            .map(|scoped| {
                let ip: IpAddr = scoped.clone().into();
                SocketAddr::new(ip, DNS_PORT)
            })
            .collect();

        if resolvers.is_empty() {
            return Err("no nameserver entries".to_string());
        }

        debug!(count = resolvers.len(), "Parsed resolv.conf nameservers");
        Ok(Self { resolvers })
    }
}
