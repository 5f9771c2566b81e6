//! Shared application state for all routes.

use crate::config::{NameMatch, Settings};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: Settings) -> Self {
        AppState {
            pool,
            settings: Arc::new(settings),
        }
    }

    pub fn name_match(&self) -> NameMatch {
        self.settings.name_match
    }
}
