//! SportsWorldCentral fantasy football API: CRUD over SQLite with typed schemas.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{NameMatch, Settings};
pub use error::{AppError, ConfigError};
pub use migration::{read_seed_script, seed_if_empty};
pub use routes::{api_routes, app, common_routes, App, MAX_BODY_BYTES};
pub use service::{CrudService, LeagueService};
pub use state::AppState;
pub use store::{ensure_tables, open_pool};
