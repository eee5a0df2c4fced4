//! Dashboard summary

use serde::{Deserialize, Serialize};

/// Front-of-house counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Reservations whose time falls on the current UTC day
    pub today_reservations: i64,
    pub total_tables: i64,
    pub occupied_tables: i64,
    pub available_tables: i64,
    /// Entries still waiting
    pub waitlist_count: i64,
}
