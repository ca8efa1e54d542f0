//! dnsperf Infrastructure Layer
pub mod database;
pub mod dns;
pub mod repositories;
