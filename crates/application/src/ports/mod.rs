mod domain_stats_repository;
mod latency_probe;
mod measurement_repository;
mod nameserver_discovery;

pub use domain_stats_repository::DomainStatsRepository;
pub use latency_probe::LatencyProbe;
pub use measurement_repository::MeasurementRepository;
pub use nameserver_discovery::NameserverDiscovery;
