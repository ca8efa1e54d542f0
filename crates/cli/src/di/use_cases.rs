use super::{DnsServices, Repositories};
use dnsperf_application::use_cases::{
    GetStatsReportUseCase, MeasureDomainUseCase, SeedDomainStatsUseCase,
    UpdateDomainStatsUseCase,
};
use dnsperf_domain::config::ScheduleConfig;
use std::sync::Arc;

pub struct UseCases {
    pub seed_stats: Arc<SeedDomainStatsUseCase>,
    pub measure_domain: Arc<MeasureDomainUseCase>,
    pub update_stats: Arc<UpdateDomainStatsUseCase>,
    pub get_report: Arc<GetStatsReportUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, dns: &DnsServices, schedule: &ScheduleConfig) -> Self {
        Self {
            seed_stats: Arc::new(SeedDomainStatsUseCase::new(
                repos.measurements.clone(),
                repos.stats.clone(),
            )),
            measure_domain: Arc::new(
                MeasureDomainUseCase::new(
                    dns.discovery.clone(),
                    dns.probe.clone(),
                    repos.measurements.clone(),
                )
                .with_concurrency(schedule.concurrent_probes),
            ),
            update_stats: Arc::new(UpdateDomainStatsUseCase::new(
                repos.measurements.clone(),
                repos.stats.clone(),
            )),
            get_report: Arc::new(GetStatsReportUseCase::new(repos.stats.clone())),
        }
    }
}
