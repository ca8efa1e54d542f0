use crate::ports::DomainStatsRepository;
use dnsperf_domain::{DomainError, DomainStats};
use std::sync::Arc;
use tracing::instrument;

pub struct GetStatsReportUseCase {
    stats: Arc<dyn DomainStatsRepository>,
}

impl GetStatsReportUseCase {
    pub fn new(stats: Arc<dyn DomainStatsRepository>) -> Self {
        Self { stats }
    }

    /// Stats for `domains` in the given order; domains without a row are
    /// reported as empty.
    #[instrument(skip(self, domains))]
    pub async fn execute(&self, domains: &[String]) -> Result<Vec<DomainStats>, DomainError> {
        let all = self.stats.get_all().await?;

        Ok(domains
            .iter()
            .map(|domain| {
                all.iter()
                    .find(|s| s.domain.eq_ignore_ascii_case(domain))
                    .cloned()
                    .unwrap_or_else(|| DomainStats::empty(domain.as_str()))
            })
            .collect())
    }

    pub async fn report_lines(&self, domains: &[String]) -> Result<Vec<String>, DomainError> {
        Ok(self
            .execute(domains)
            .await?
            .iter()
            .map(DomainStats::report_line)
            .collect())
    }
}
