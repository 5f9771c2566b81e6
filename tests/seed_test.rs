//! Seed script loading and file-backed persistence.

mod common;

use common::SEED_SQL;
use std::io::Write;
use swc_api::{ensure_tables, open_pool, read_seed_script, seed_if_empty, ConfigError, LeagueService};

#[tokio::test]
async fn seed_runs_once_from_a_script_file() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    script.write_all(SEED_SQL.as_bytes()).unwrap();
    let sql = read_seed_script(script.path()).await.unwrap();

    let pool = open_pool("sqlite::memory:", 1).await.unwrap();
    ensure_tables(&pool).await.unwrap();
    assert!(seed_if_empty(&pool, &sql).await.unwrap());
    assert!(!seed_if_empty(&pool, &sql).await.unwrap());
    assert_eq!(LeagueService::counts(&pool).await.unwrap().player_count, 8);
}

#[tokio::test]
async fn missing_script_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_seed_script(&dir.path().join("absent.sql")).await.unwrap_err();
    assert!(matches!(err, ConfigError::SeedScript { .. }));
}

#[tokio::test]
async fn failed_seed_leaves_database_empty() {
    let pool = open_pool("sqlite::memory:", 1).await.unwrap();
    ensure_tables(&pool).await.unwrap();
    let broken = "INSERT INTO league (league_id, league_name, scoring_type, league_size, last_changed_date) \
                  VALUES (1, 'L', 'PPR', 8, '2024-04-18'); INSERT INTO nowhere VALUES (1);";
    assert!(seed_if_empty(&pool, broken).await.is_err());
    assert_eq!(LeagueService::counts(&pool).await.unwrap().league_count, 0);
}

#[tokio::test]
async fn file_database_keeps_data_across_pools() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("fantasy_data.db").display());

    let pool = open_pool(&url, 2).await.unwrap();
    ensure_tables(&pool).await.unwrap();
    assert!(seed_if_empty(&pool, SEED_SQL).await.unwrap());
    pool.close().await;

    let pool = open_pool(&url, 2).await.unwrap();
    ensure_tables(&pool).await.unwrap();
    assert!(!seed_if_empty(&pool, SEED_SQL).await.unwrap());
    let counts = LeagueService::counts(&pool).await.unwrap();
    assert_eq!(counts.team_count, 4);
    assert_eq!(counts.week_count, 3);
}
