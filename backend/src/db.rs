//! Database pool lifecycle and migrations

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Rewrite `postgres://` to the `postgresql://` scheme
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{}", rest),
        None => url.to_string(),
    }
}

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(30))
}

fn database_url(config: &Config) -> AppResult<String> {
    config
        .database_url_for_environment()
        .map(normalize_database_url)
        .ok_or_else(|| AppError::Configuration("DATABASE_URL is not configured".to_string()))
}

/// Create the connection pool for the configured environment
pub async fn connect(config: &Config) -> AppResult<PgPool> {
    let url = database_url(config)?;
    let pool = pool_options(config).connect(&url).await?;
    Ok(pool)
}

/// Pool that opens connections on first use
pub fn connect_lazy(config: &Config) -> AppResult<PgPool> {
    let url = database_url(config)?;
    let pool = pool_options(config).connect_lazy(&url)?;
    Ok(pool)
}

/// Run `SELECT 1` against the pool
pub async fn check_connection(pool: &PgPool) -> bool {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = %e, "Database connectivity check failed");
            false
        }
    }
}

/// Apply embedded migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))
}
