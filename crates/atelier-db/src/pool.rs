//! Connection pool construction and migrations.

use atelier_core::{AppResult, Config};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Connect to Postgres and run pending migrations.
pub async fn connect(config: &Config) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| atelier_core::AppError::Config(format!("Migration failed: {e}")))?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database pool ready"
    );
    Ok(pool)
}
