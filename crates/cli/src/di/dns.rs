use dnsperf_application::ports::{LatencyProbe, NameserverDiscovery};
use dnsperf_domain::config::DnsConfig;
use dnsperf_infrastructure::dns::{
    AuthoritativeProbe, RecursiveNameserverDiscovery, SystemResolverConfig,
};
use std::sync::Arc;
use std::time::Duration;

pub struct DnsServices {
    pub discovery: Arc<dyn NameserverDiscovery>,
    pub probe: Arc<dyn LatencyProbe>,
}

impl DnsServices {
    pub fn new(cfg: &DnsConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(cfg.query_timeout_ms);
        let bootstrap = cfg.bootstrap_addrs().map_err(anyhow::Error::msg)?;
        let resolvers = SystemResolverConfig::load(&cfg.resolv_conf_path, bootstrap)?;

        let discovery = RecursiveNameserverDiscovery::new(resolvers, timeout).with_ipv6(cfg.ipv6);
        let probe = AuthoritativeProbe::new(cfg.authoritative_port, timeout)
            .with_recursion_desired(cfg.recursion_desired)
            .with_require_answer(cfg.require_answer);

        Ok(Self {
            discovery: Arc::new(discovery),
            probe: Arc::new(probe),
        })
    }
}
