use dnsperf_application::ports::{DomainStatsRepository, MeasurementRepository};
use dnsperf_infrastructure::repositories::{
    SqliteDomainStatsRepository, SqliteMeasurementRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub measurements: Arc<dyn MeasurementRepository>,
    pub stats: Arc<dyn DomainStatsRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            measurements: Arc::new(SqliteMeasurementRepository::new(pool.clone())),
            stats: Arc::new(SqliteDomainStatsRepository::new(pool)),
        }
    }
}
