pub mod get_report;
pub mod seed_stats;
pub mod update_stats;

pub use get_report::GetStatsReportUseCase;
pub use seed_stats::SeedDomainStatsUseCase;
pub use update_stats::UpdateDomainStatsUseCase;
