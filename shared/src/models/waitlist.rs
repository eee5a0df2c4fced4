//! Waitlist Model (候位)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Waitlist entry status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum WaitlistStatus {
    #[default]
    Waiting,
    Notified,
    Seated,
    Left,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Notified => "notified",
            Self::Seated => "seated",
            Self::Left => "left",
        }
    }

    /// Seated and left are terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Seated | Self::Left)
    }
}

impl fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Walk-in party waiting for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WaitlistEntry {
    pub id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub party_size: i32,
    /// Defines FIFO order (Unix millis)
    pub joined_at: i64,
    pub status: WaitlistStatus,
    /// Minutes, computed once when the party joins
    pub estimated_wait_time: Option<i32>,
}

/// Join waitlist payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistCreate {
    pub customer_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub party_size: i32,
}

/// Update waitlist entry payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistUpdate {
    pub status: WaitlistStatus,
}

/// Result of joining the waitlist
///
/// `message` is present when the party was seated right away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistJoined {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub waitlist: WaitlistEntry,
}
