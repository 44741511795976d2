//! Database connection management

use std::time::{Duration, Instant};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{config::DatabaseConfig, constants::DATABASE_ACQUIRE_TIMEOUT_SECONDS};

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(DATABASE_ACQUIRE_TIMEOUT_SECONDS))
        .connect(&config.url)
        .await
}

/// Round-trip to the database, returning how long it took
pub async fn ping(pool: &PgPool) -> Result<Duration, sqlx::Error> {
    let started = Instant::now();
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(started.elapsed())
}
