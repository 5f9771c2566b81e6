//! Shared fixtures: an in-memory database loaded with the demo seed.

#![allow(dead_code)]

use sqlx::SqlitePool;
use swc_api::{app, ensure_tables, open_pool, seed_if_empty, App, AppState, NameMatch, Settings};

pub const SEED_SQL: &str = include_str!("../../sql/seed_data.sql");

pub async fn seeded_pool() -> SqlitePool {
    let pool = open_pool("sqlite::memory:", 1).await.unwrap();
    ensure_tables(&pool).await.unwrap();
    assert!(seed_if_empty(&pool, SEED_SQL).await.unwrap());
    pool
}

pub async fn seeded_app(name_match: NameMatch) -> App {
    let settings = Settings {
        name_match,
        ..Settings::default()
    };
    app(AppState::new(seeded_pool().await, settings))
}
