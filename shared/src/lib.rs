//! Shared types for the seating workspace
//!
//! Domain models (tables, reservations, waitlist entries), the unified error
//! system and time helpers used by the server and by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
