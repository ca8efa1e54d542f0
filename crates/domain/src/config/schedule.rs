use serde::{Deserialize, Serialize};

/// Domains measured when no list is configured.
pub const DEFAULT_DOMAINS: [&str; 10] = [
    "google.com",
    "facebook.com",
    "youtube.com",
    "yahoo.com",
    "live.com",
    "wikipedia.org",
    "baidu.com",
    "blogger.com",
    "msn.com",
    "qq.com",
];

/// Measurement schedule
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Sleep between passes in milliseconds (default: 1000)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Domains measured on every pass, in order
    #[serde(default = "default_domains")]
    pub domains: Vec<String>,

    /// Probe a domain's nameservers concurrently (default: true)
    #[serde(default = "default_true")]
    pub concurrent_probes: bool,

    /// Log the per-domain summary after each pass (default: true)
    #[serde(default = "default_true")]
    pub report: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            domains: default_domains(),
            concurrent_probes: true,
            report: true,
        }
    }
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_domains() -> Vec<String> {
    DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
}

fn default_true() -> bool {
    true
}
