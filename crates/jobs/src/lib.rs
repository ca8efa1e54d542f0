pub mod measurement;
pub mod runner;

pub use measurement::{MeasurementJob, PassSummary};
pub use runner::JobRunner;
