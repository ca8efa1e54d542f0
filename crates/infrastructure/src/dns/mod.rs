pub mod discovery;
pub mod exchange;
pub mod forwarding;
pub mod probe;
pub mod system_resolver;
pub mod transport;

pub use discovery::RecursiveNameserverDiscovery;
pub use probe::AuthoritativeProbe;
pub use system_resolver::SystemResolverConfig;
