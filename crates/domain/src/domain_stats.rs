use crate::measurement::Measurement;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Per-domain summary derived from the measurement log.
///
/// A fresh (seeded) row has `count == 0` and every other field `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainStats {
    pub domain: Arc<str>,
    pub count: u64,
    /// Mean latency in microseconds.
    pub mean_us: Option<f64>,
    /// Sample standard deviation in microseconds, defined only when `count >= 2`.
    pub stddev_us: Option<f64>,
    pub first_observed_at: Option<DateTime<Utc>>,
    pub last_observed_at: Option<DateTime<Utc>>,
}

impl DomainStats {
    pub fn empty(domain: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            count: 0,
            mean_us: None,
            stddev_us: None,
            first_observed_at: None,
            last_observed_at: None,
        }
    }

    /// Recomputes the summary over a domain's full measurement history.
    ///
    /// Returns `None` when there is nothing to summarize, so that callers never
    /// overwrite a row with undefined values.
    pub fn from_measurements(domain: &str, measurements: &[Measurement]) -> Option<Self> {
        let mut acc = StatsAccumulator::default();
        for m in measurements.iter().filter(|m| &*m.domain == domain) {
            acc.push(m.latency.as_micros(), m.observed_at);
        }
        acc.finish(domain)
    }

    pub fn mean_ms(&self) -> Option<f64> {
        self.mean_us.map(|us| us / 1000.0)
    }

    pub fn stddev_ms(&self) -> Option<f64> {
        self.stddev_us.map(|us| us / 1000.0)
    }

    /// One human-readable summary line for the pass report.
    pub fn report_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DomainStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "domain: {} count: {} queries, Avg: {} ms, Stddev: {} ms, first query: {}, last query: {}",
            self.domain,
            self.count,
            format_ms(self.mean_ms()),
            format_ms(self.stddev_ms()),
            format_timestamp(self.first_observed_at),
            format_timestamp(self.last_observed_at),
        )
    }
}

fn format_ms(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "n/a".to_string(),
    }
}

fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => "n/a".to_string(),
    }
}

/// Welford running mean/variance over latency samples.
///
/// Produces the same mean and Bessel-corrected deviation as a two-pass
/// computation, without holding the samples.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
    first: Option<DateTime<Utc>>,
    last: Option<DateTime<Utc>>,
}

impl StatsAccumulator {
    pub fn push(&mut self, latency_us: u64, observed_at: DateTime<Utc>) {
        self.count += 1;
        let x = latency_us as f64;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);

        self.first = Some(self.first.map_or(observed_at, |f| f.min(observed_at)));
        self.last = Some(self.last.map_or(observed_at, |l| l.max(observed_at)));
    }

    pub fn finish(&self, domain: &str) -> Option<DomainStats> {
        if self.count == 0 {
            return None;
        }

        let stddev_us = if self.count >= 2 {
            let variance = self.m2 / (self.count - 1) as f64;
            Some(variance.max(0.0).sqrt())
        } else {
            None
        };

        Some(DomainStats {
            domain: Arc::from(domain),
            count: self.count,
            mean_us: Some(self.mean),
            stddev_us,
            first_observed_at: self.first,
            last_observed_at: self.last,
        })
    }
}
