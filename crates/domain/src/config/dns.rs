use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// DNS settings for nameserver discovery and authoritative probes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// System resolver configuration used for discovery
    #[serde(default = "default_resolv_conf_path")]
    pub resolv_conf_path: String,

    /// Recursive resolvers used instead of resolv.conf ("ip" or "ip:port")
    #[serde(default)]
    pub bootstrap_resolvers: Vec<String>,

    /// Per-query timeout in milliseconds (default: 2000)
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Port the authoritative nameservers are queried on (default: 53)
    #[serde(default = "default_dns_port")]
    pub authoritative_port: u16,

    /// Also discover and probe IPv6 nameserver addresses (default: false)
    #[serde(default)]
    pub ipv6: bool,

    /// Set the RD flag on authoritative probes (default: false)
    #[serde(default)]
    pub recursion_desired: bool,

    /// Count a probe as failed unless the answer carries an A record
    /// (default: false, any NOERROR/NXDOMAIN response is a round-trip)
    #[serde(default)]
    pub require_answer: bool,
}

impl DnsConfig {
    /// Parses `bootstrap_resolvers`, defaulting to port 53.
    pub fn bootstrap_addrs(&self) -> Result<Vec<SocketAddr>, String> {
        self.bootstrap_resolvers
            .iter()
            .map(|s| parse_resolver_addr(s))
            .collect()
    }
}

pub fn parse_resolver_addr(s: &str) -> Result<SocketAddr, String> {
    let s = s.trim();
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }
    s.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, default_dns_port()))
        .map_err(|_| format!("Invalid resolver address '{}'", s))
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            resolv_conf_path: default_resolv_conf_path(),
            bootstrap_resolvers: Vec::new(),
            query_timeout_ms: default_query_timeout_ms(),
            authoritative_port: default_dns_port(),
            ipv6: false,
            recursion_desired: false,
            require_answer: false,
        }
    }
}

fn default_resolv_conf_path() -> String {
    "/etc/resolv.conf".to_string()
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_dns_port() -> u16 {
    53
}
