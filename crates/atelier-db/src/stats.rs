//! Signup statistics repository.

use async_trait::async_trait;
use atelier_core::repository::StatsRepository;
use atelier_core::{AppError, AppResult};
use chrono::{TimeZone, Utc};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn monthly_signups(&self, year: i32) -> AppResult<Vec<(u32, i64)>> {
        let start = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::Validation(format!("Invalid year {year}")))?;
        let end = Utc
            .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::Validation(format!("Invalid year {year}")))?;

        let rows: Vec<(i32, i64)> = sqlx::query_as(
            "SELECT EXTRACT(MONTH FROM created_at)::int AS month, COUNT(*) AS total \
             FROM subscribers WHERE created_at >= $1 AND created_at < $2 \
             GROUP BY 1 ORDER BY 1",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(month, total)| (month.max(0) as u32, total))
            .collect())
    }
}
