use crate::ports::{DomainStatsRepository, MeasurementRepository};
use dnsperf_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Prepares the stores before the first pass: optional reset, then one empty
/// stats row per configured domain.
pub struct SeedDomainStatsUseCase {
    measurements: Arc<dyn MeasurementRepository>,
    stats: Arc<dyn DomainStatsRepository>,
}

impl SeedDomainStatsUseCase {
    pub fn new(
        measurements: Arc<dyn MeasurementRepository>,
        stats: Arc<dyn DomainStatsRepository>,
    ) -> Self {
        Self {
            measurements,
            stats,
        }
    }

    #[instrument(skip(self, domains))]
    pub async fn execute(&self, domains: &[String], reset: bool) -> Result<u64, DomainError> {
        if reset {
            let dropped = self.measurements.clear().await?;
            let cleared = self.stats.clear().await?;
            warn!(
                measurements = dropped,
                stats_rows = cleared,
                "Database reset, previous measurements discarded"
            );
        }

        let seeded = self.stats.seed(domains).await?;
        info!(seeded, domains = domains.len(), "Domain stats rows seeded");
        Ok(seeded)
    }
}
