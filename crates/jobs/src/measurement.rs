use dnsperf_application::use_cases::{
    GetStatsReportUseCase, MeasureDomainUseCase, UpdateDomainStatsUseCase,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Totals for one pass over the configured domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub domains_measured: usize,
    pub domains_skipped: usize,
    pub recorded: usize,
    pub failed_probes: usize,
    pub cancelled: bool,
}

/// The scheduler loop: measure every domain in order, refresh its stats,
/// report, then sleep for the interval. Runs until cancelled.
pub struct MeasurementJob {
    measure: Arc<MeasureDomainUseCase>,
    update_stats: Arc<UpdateDomainStatsUseCase>,
    report: Option<Arc<GetStatsReportUseCase>>,
    domains: Vec<String>,
    interval_ms: u64,
    shutdown: CancellationToken,
}

impl MeasurementJob {
    pub fn new(
        measure: Arc<MeasureDomainUseCase>,
        update_stats: Arc<UpdateDomainStatsUseCase>,
        domains: Vec<String>,
    ) -> Self {
        Self {
            measure,
            update_stats,
            report: None,
            domains,
            interval_ms: 1000,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn with_report(mut self, report: Arc<GetStatsReportUseCase>) -> Self {
        self.report = Some(report);
        self
    }

    /// One full pass. A shutdown mid-domain drops that domain's in-flight
    /// probes and ends the pass.
    pub async fn run_pass(&self) -> PassSummary {
        let mut summary = PassSummary::default();

        for domain in &self.domains {
            let report = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    summary.cancelled = true;
                    return summary;
                }
                report = self.measure.execute(domain) => report,
            };

            if report.skipped() {
                summary.domains_skipped += 1;
                continue;
            }

            summary.domains_measured += 1;
            summary.recorded += report.recorded;
            summary.failed_probes += report.failed_probes;

            // Rebuilt from full history even when this pass recorded nothing,
            // so a failed write from an earlier pass is caught up.
            if let Err(e) = self.update_stats.execute(domain).await {
                error!(domain = %domain, error = %e, "Failed to update domain stats");
            }
        }

        if let Some(report) = &self.report {
            match report.report_lines(&self.domains).await {
                Ok(lines) => {
                    for line in lines {
                        info!("{}", line);
                    }
                }
                Err(e) => error!(error = %e, "Failed to build stats report"),
            }
        }

        debug!(
            measured = summary.domains_measured,
            skipped = summary.domains_skipped,
            recorded = summary.recorded,
            "Pass complete"
        );

        summary
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            domains = self.domains.len(),
            interval_ms = self.interval_ms,
            "Starting measurement job"
        );

        tokio::spawn(async move {
            let interval = Duration::from_millis(self.interval_ms);
            loop {
                if self.run_pass().await.cancelled {
                    info!("MeasurementJob: shutting down");
                    break;
                }

                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("MeasurementJob: shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        })
    }
}
