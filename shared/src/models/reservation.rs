//! Reservation Model (预订)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Cancelled,
}

impl ReservationStatus {
    /// Statuses whose reservations hold their table for the occupancy window
    pub const HOLDING: [ReservationStatus; 2] =
        [ReservationStatus::Confirmed, ReservationStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Seated => "seated",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether a reservation in this status may carry a `table_id`
    pub fn may_have_table(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Seated)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub party_size: i32,
    /// Requested seating time (Unix millis)
    pub reservation_time: i64,
    pub created_at: i64,
    pub status: ReservationStatus,
    /// Set exactly when status is confirmed or seated
    pub table_id: Option<i64>,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub customer_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub party_size: i32,
    /// RFC 3339 timestamp, e.g. `2026-05-01T19:00:00Z`
    pub reservation_time: String,
}

/// Update reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub status: ReservationStatus,
}
