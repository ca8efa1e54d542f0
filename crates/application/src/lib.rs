//! dnsperf Application Layer
//!
//! Ports describe what the measurement engine needs from the outside world;
//! use cases compose them into the per-domain pass.
pub mod ports;
pub mod use_cases;
