//! Occupancy windows
//!
//! A reservation holds its table from 90 minutes before to 90 minutes after
//! its time. Windows are closed intervals: touching endpoints overlap.

use shared::util::minutes_to_millis;

/// Half-width of the window a reservation holds its table for
pub const HOLD_HALF_WINDOW_MINUTES: i64 = 90;

/// Closed interval `[start, end]` in Unix millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyWindow {
    pub start: i64,
    pub end: i64,
}

impl OccupancyWindow {
    /// Window held by a reservation at `at`
    pub fn around(at: i64) -> Self {
        let half = minutes_to_millis(HOLD_HALF_WINDOW_MINUTES);
        Self {
            start: at - half,
            end: at + half,
        }
    }

    pub fn overlaps(&self, other: &OccupancyWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Range of reservation times whose windows overlap this one
    ///
    /// Used to push the overlap filter down to the store as a plain
    /// `reservation_time BETWEEN start AND end` query.
    pub fn conflicting_times(&self) -> OccupancyWindow {
        let half = minutes_to_millis(HOLD_HALF_WINDOW_MINUTES);
        Self {
            start: self.start - half,
            end: self.end + half,
        }
    }

    pub fn contains(&self, at: i64) -> bool {
        self.start <= at && at <= self.end
    }
}
