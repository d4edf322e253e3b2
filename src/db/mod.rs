//! Database connection and pool management for Lendora
//!
//! PostgreSQL connection pooling, migrations, and the connectivity probe
//! used by the health endpoint and the request guard middleware.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

/// Bound on the connectivity probe and on pool acquisition.
pub const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to run migrations: {0}")]
    MigrationError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Create a database connection pool
pub async fn create_pool(config: &Config) -> Result<PgPool, DbError> {
    tracing::info!("Connecting to database at {}", config.database_url_masked());

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(DB_PROBE_TIMEOUT)
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database_url)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    tracing::info!("Database migrations completed successfully");

    Ok(())
}

/// Check database connectivity, bounded by [`DB_PROBE_TIMEOUT`]
pub async fn check_health(pool: &PgPool) -> Result<(), DbError> {
    let probe = sqlx::query("SELECT 1").fetch_one(pool);

    match tokio::time::timeout(DB_PROBE_TIMEOUT, probe).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(DbError::HealthCheckError(e.to_string())),
        Err(_) => Err(DbError::HealthCheckError(format!(
            "probe timed out after {}s",
            DB_PROBE_TIMEOUT.as_secs()
        ))),
    }
}
