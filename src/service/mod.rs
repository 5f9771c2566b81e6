//! Data access layer: validation and SQL execution.

pub mod crud;
pub mod league;
pub mod validation;

pub use crud::CrudService;
pub use league::LeagueService;
pub use validation::{parse_id, Validate};
