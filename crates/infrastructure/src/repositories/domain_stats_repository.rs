use super::{format_timestamp, parse_timestamp};
use async_trait::async_trait;
use chrono::Utc;
use dnsperf_application::ports::DomainStatsRepository;
use dnsperf_domain::{DomainError, DomainStats};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

type StatsRow = (
    String,
    Option<f64>,
    Option<f64>,
    i64,
    Option<String>,
    Option<String>,
);

pub struct SqliteDomainStatsRepository {
    pool: SqlitePool,
}

impl SqliteDomainStatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_stats(row: StatsRow) -> Result<DomainStats, DomainError> {
        let (domain, average_us, stddev_us, query_count, first_query, last_query) = row;

        Ok(DomainStats {
            domain: Arc::from(domain.as_str()),
            count: query_count.max(0) as u64,
            mean_us: average_us,
            stddev_us,
            first_observed_at: first_query.as_deref().map(parse_timestamp).transpose()?,
            last_observed_at: last_query.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

#[async_trait]
impl DomainStatsRepository for SqliteDomainStatsRepository {
    #[instrument(skip(self, domains), fields(count = domains.len()))]
    async fn seed(&self, domains: &[String]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin seed transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut seeded = 0;
        for domain in domains {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO domain_stats (domain, query_count) VALUES (?, 0)",
            )
            .bind(domain)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, domain = %domain, "Failed to seed domain stats");
                DomainError::DatabaseError(e.to_string())
            })?;
            seeded += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit seed transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(seeded)
    }

    #[instrument(skip(self, stats), fields(domain = %stats.domain))]
    async fn upsert(&self, stats: &DomainStats) -> Result<(), DomainError> {
        let query_count = i64::try_from(stats.count)
            .map_err(|_| DomainError::DatabaseError(format!("count {} out of range", stats.count)))?;

        sqlx::query(
            "INSERT INTO domain_stats
                (domain, average_us, stddev_us, query_count, first_query, last_query, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(domain) DO UPDATE SET
                average_us = excluded.average_us,
                stddev_us = excluded.stddev_us,
                query_count = excluded.query_count,
                first_query = excluded.first_query,
                last_query = excluded.last_query,
                updated_at = excluded.updated_at",
        )
        .bind(stats.domain.as_ref())
        .bind(stats.mean_us)
        .bind(stats.stddev_us)
        .bind(query_count)
        .bind(stats.first_observed_at.as_ref().map(format_timestamp))
        .bind(stats.last_observed_at.as_ref().map(format_timestamp))
        .bind(format_timestamp(&Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to upsert domain stats");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, domain: &str) -> Result<Option<DomainStats>, DomainError> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT domain, average_us, stddev_us, query_count, first_query, last_query
             FROM domain_stats WHERE domain = ?",
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query domain stats");
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Self::row_to_stats).transpose()
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<DomainStats>, DomainError> {
        let rows = sqlx::query_as::<_, StatsRow>(
            "SELECT domain, average_us, stddev_us, query_count, first_query, last_query
             FROM domain_stats
             ORDER BY domain ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query all domain stats");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Self::row_to_stats).collect()
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM domain_stats")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to clear domain stats");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }
}
