use crate::ports::{DomainStatsRepository, MeasurementRepository};
use dnsperf_domain::{DomainError, DomainStats};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Recomputes a domain's summary from its full measurement history and
/// overwrites the stored row.
pub struct UpdateDomainStatsUseCase {
    measurements: Arc<dyn MeasurementRepository>,
    stats: Arc<dyn DomainStatsRepository>,
}

impl UpdateDomainStatsUseCase {
    pub fn new(
        measurements: Arc<dyn MeasurementRepository>,
        stats: Arc<dyn DomainStatsRepository>,
    ) -> Self {
        Self {
            measurements,
            stats,
        }
    }

    /// Returns `Ok(None)` without writing when the domain has no measurements.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<Option<DomainStats>, DomainError> {
        let history = self.measurements.list_for_domain(domain).await?;

        let Some(stats) = DomainStats::from_measurements(domain, &history) else {
            debug!(domain = %domain, "No measurements yet, stats left untouched");
            return Ok(None);
        };

        self.stats.upsert(&stats).await?;

        debug!(
            domain = %domain,
            count = stats.count,
            mean_us = ?stats.mean_us,
            stddev_us = ?stats.stddev_us,
            "Domain stats updated"
        );

        Ok(Some(stats))
    }
}
