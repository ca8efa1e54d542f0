pub mod measurement;
pub mod stats;

pub use measurement::{DomainPassReport, MeasureDomainUseCase};
pub use stats::{GetStatsReportUseCase, SeedDomainStatsUseCase, UpdateDomainStatsUseCase};
