//! SQLite pool setup and table DDL.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Tables in dependency order. Every statement is idempotent.
const TABLE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS player (
        player_id INTEGER PRIMARY KEY,
        gsis_id TEXT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        position TEXT NOT NULL,
        last_changed_date DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS performance (
        performance_id INTEGER PRIMARY KEY,
        week_number TEXT NOT NULL,
        fantasy_points REAL NOT NULL,
        last_changed_date DATE NOT NULL,
        player_id INTEGER NOT NULL REFERENCES player (player_id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS league (
        league_id INTEGER PRIMARY KEY,
        league_name TEXT NOT NULL,
        scoring_type TEXT NOT NULL,
        league_size INTEGER NOT NULL,
        last_changed_date DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team (
        team_id INTEGER PRIMARY KEY,
        team_name TEXT NOT NULL,
        last_changed_date DATE NOT NULL,
        league_id INTEGER NOT NULL REFERENCES league (league_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team_player (
        team_id INTEGER NOT NULL REFERENCES team (team_id),
        player_id INTEGER NOT NULL REFERENCES player (player_id) ON DELETE CASCADE,
        last_changed_date DATE NOT NULL,
        PRIMARY KEY (team_id, player_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS week (
        week_number TEXT PRIMARY KEY,
        ppr_8_max_points REAL NOT NULL,
        ppr_10_max_points REAL NOT NULL,
        ppr_12_max_points REAL NOT NULL,
        ppr_14_max_points REAL NOT NULL,
        half_ppr_8_max_points REAL NOT NULL,
        half_ppr_10_max_points REAL NOT NULL,
        half_ppr_12_max_points REAL NOT NULL,
        half_ppr_14_max_points REAL NOT NULL,
        std_8_max_points REAL NOT NULL,
        std_10_max_points REAL NOT NULL,
        std_12_max_points REAL NOT NULL,
        std_14_max_points REAL NOT NULL,
        last_changed_date DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team_week (
        team_id INTEGER NOT NULL REFERENCES team (team_id),
        week_number TEXT NOT NULL REFERENCES week (week_number),
        fantasy_points REAL NOT NULL,
        last_changed_date DATE NOT NULL,
        PRIMARY KEY (team_id, week_number)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_performance_player ON performance (player_id, week_number)",
    "CREATE INDEX IF NOT EXISTS ix_team_league ON team (league_id)",
    "CREATE INDEX IF NOT EXISTS ix_team_player_player ON team_player (player_id)",
];

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open a pool, creating the database file if missing. Foreign keys are enforced on every connection.
/// In-memory databases get one connection that never expires, since each connection would otherwise see its own empty database.
pub async fn open_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };
    let pool = pool_options.connect_with(options).await?;
    tracing::debug!(database_url = %database_url, "database pool opened");
    Ok(pool)
}

/// Create every table and index if it does not exist yet.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in TABLE_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(statements = TABLE_DDL.len(), "schema ensured");
    Ok(())
}
