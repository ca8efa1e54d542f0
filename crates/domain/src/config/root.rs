use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::database::DatabaseConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::schedule::ScheduleConfig;
use crate::validators::validate_domain_name;

const DEFAULT_CONFIG_FILE: &str = "dnsperf.toml";

/// Main configuration structure
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub interval_ms: Option<u64>,
    pub database_path: Option<String>,
    pub domains: Option<Vec<String>>,
    pub log_level: Option<String>,
    pub quiet: bool,
}

impl Config {
    /// Loads configuration from `config_path`, or from `dnsperf.toml` in the
    /// working directory when it exists, then applies CLI overrides.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(interval_ms) = overrides.interval_ms {
            self.schedule.interval_ms = interval_ms;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(domains) = overrides.domains {
            if !domains.is_empty() {
                self.schedule.domains = domains;
            }
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.quiet {
            self.schedule.report = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule.domains.is_empty() {
            return Err(ConfigError::InvalidDomains(
                "at least one domain must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for domain in &self.schedule.domains {
            validate_domain_name(domain).map_err(ConfigError::InvalidDomains)?;
            let key = domain.trim_end_matches('.').to_ascii_lowercase();
            if !seen.insert(key) {
                return Err(ConfigError::InvalidDomains(format!(
                    "domain '{}' is listed more than once",
                    domain
                )));
            }
        }

        if self.schedule.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "schedule.interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "dns.query_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.dns.authoritative_port == 0 {
            return Err(ConfigError::Validation(
                "dns.authoritative_port must be greater than zero".to_string(),
            ));
        }
        self.dns.bootstrap_addrs().map_err(ConfigError::Validation)?;

        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database.path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
