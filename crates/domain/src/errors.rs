use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("No nameservers found for {0}")]
    NoNameservers(String),

    #[error("No usable response from {0}")]
    NoResponse(String),

    #[error("Resolver configuration error: {0}")]
    ResolverConfig(String),

    #[error("Invalid latency: {0}")]
    InvalidLatency(String),
}
