use crate::MeasurementJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once and
/// await the returned handles on shutdown.
///
/// # Example
///
/// ```rust,ignore
/// let handles = JobRunner::new()
///     .with_measurement(MeasurementJob::new(measure, update_stats, domains))
///     .start();
/// ```
pub struct JobRunner {
    measurement: Option<MeasurementJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self { measurement: None }
    }

    pub fn with_measurement(mut self, job: MeasurementJob) -> Self {
        self.measurement = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::new();
        if let Some(job) = self.measurement {
            handles.push(Arc::new(job).start());
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
