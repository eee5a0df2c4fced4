//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
///
/// `is_occupied` only reflects walk-in seating; future reservations are
/// tracked through their occupancy windows instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    /// Human-facing number, unique per restaurant
    pub table_number: i32,
    /// Largest party the table can serve
    pub capacity: i32,
    pub is_occupied: bool,
}

impl DiningTable {
    pub fn fits(&self, party_size: i32) -> bool {
        self.capacity >= party_size
    }
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: i32,
    pub capacity: i32,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub capacity: Option<i32>,
    pub is_occupied: Option<bool>,
}
