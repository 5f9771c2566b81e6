//! One-time data import from a SQL script.

use crate::error::{AppError, ConfigError};
use sqlx::SqlitePool;
use std::path::Path;

pub async fn read_seed_script(path: &Path) -> Result<String, ConfigError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::SeedScript {
            path: path.display().to_string(),
            source,
        })
}

/// Run `script` in one transaction, but only when the player table is empty.
/// Returns whether the script ran.
pub async fn seed_if_empty(pool: &SqlitePool, script: &str) -> Result<bool, AppError> {
    let (players,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM player")
        .fetch_one(pool)
        .await?;
    if players > 0 {
        tracing::info!(players, "database already populated, skipping seed");
        return Ok(false);
    }
    let mut tx = pool.begin().await?;
    sqlx::raw_sql(script).execute(&mut *tx).await?;
    tx.commit().await?;
    tracing::info!("seed script applied");
    Ok(true)
}
