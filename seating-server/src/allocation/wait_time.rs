//! Walk-in wait estimate

/// Assumed minutes for a table to turn over
pub const TURNOVER_MINUTES: i64 = 15;

/// Estimated wait in minutes
///
/// With suitable tables the queue drains in parallel across them, floored at
/// one turnover. Without any the estimate degrades to one turnover per party
/// ahead.
pub fn estimate_wait_minutes(waiting_ahead: usize, suitable_tables: usize) -> i32 {
    let ahead = waiting_ahead as i64;
    let minutes = if suitable_tables > 0 {
        (ahead * TURNOVER_MINUTES / suitable_tables as i64).max(TURNOVER_MINUTES)
    } else {
        ahead * TURNOVER_MINUTES
    };
    i32::try_from(minutes).unwrap_or(i32::MAX)
}
