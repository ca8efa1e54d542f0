//! Configuration module for dnsperf
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `schedule`: Domain list and pass interval
//! - `dns`: Discovery and probe settings
//! - `logging`: Logging settings
//! - `database`: Database configuration
//! - `errors`: Configuration errors

pub mod database;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod schedule;

pub use database::DatabaseConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use schedule::{ScheduleConfig, DEFAULT_DOMAINS};
