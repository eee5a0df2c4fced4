//! Data models
//!
//! Shared between seating-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are Unix millis.

pub mod dashboard;
pub mod dining_table;
pub mod reservation;
pub mod waitlist;

// Re-exports
pub use dashboard::*;
pub use dining_table::*;
pub use reservation::*;
pub use waitlist::*;
