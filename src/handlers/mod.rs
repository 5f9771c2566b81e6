//! HTTP handlers: one data access call each.

pub mod leagues;
pub mod performances;
pub mod players;
pub use leagues::*;
pub use performances::*;
pub use players::*;
