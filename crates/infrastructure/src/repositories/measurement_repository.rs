use super::{format_timestamp, parse_timestamp};
use async_trait::async_trait;
use dnsperf_application::ports::MeasurementRepository;
use dnsperf_domain::{DomainError, Latency, Measurement};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

type MeasurementRow = (i64, String, String, i64, String, Option<String>);

pub struct SqliteMeasurementRepository {
    pool: SqlitePool,
}

impl SqliteMeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_measurement(row: MeasurementRow) -> Result<Measurement, DomainError> {
        let (id, domain, nameserver, latency_us, observed_at, notes) = row;

        let latency_us = u64::try_from(latency_us)
            .map_err(|_| DomainError::InvalidLatency(format!("stored latency {}", latency_us)))?;

        Ok(Measurement {
            id: Some(id),
            domain: Arc::from(domain.as_str()),
            nameserver: Arc::from(nameserver.as_str()),
            latency: Latency::from_micros(latency_us)?,
            observed_at: parse_timestamp(&observed_at)?,
            note: notes,
        })
    }
}

#[async_trait]
impl MeasurementRepository for SqliteMeasurementRepository {
    #[instrument(skip(self, measurement), fields(domain = %measurement.domain, nameserver = %measurement.nameserver))]
    async fn append(&self, measurement: &Measurement) -> Result<i64, DomainError> {
        let latency_us = i64::try_from(measurement.latency.as_micros()).map_err(|_| {
            DomainError::InvalidLatency(format!("{} out of range", measurement.latency))
        })?;

        let result = sqlx::query(
            "INSERT INTO measurements (domain, nameserver, latency_us, observed_at, notes)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(measurement.domain.as_ref())
        .bind(measurement.nameserver.as_ref())
        .bind(latency_us)
        .bind(format_timestamp(&measurement.observed_at))
        .bind(measurement.note.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to insert measurement");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.last_insert_rowid())
    }

    #[instrument(skip(self))]
    async fn list_for_domain(&self, domain: &str) -> Result<Vec<Measurement>, DomainError> {
        let rows = sqlx::query_as::<_, MeasurementRow>(
            "SELECT id, domain, nameserver, latency_us, observed_at, notes
             FROM measurements
             WHERE domain = ?
             ORDER BY observed_at ASC, id ASC",
        )
        .bind(domain)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query measurements");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Self::row_to_measurement).collect()
    }

    #[instrument(skip(self))]
    async fn count_for_domain(&self, domain: &str) -> Result<u64, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM measurements WHERE domain = ?")
            .bind(domain)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count measurements");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(count.0.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM measurements")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to clear measurements");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }
}
