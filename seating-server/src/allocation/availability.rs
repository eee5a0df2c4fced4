//! Feasibility predicates and smallest-fit selection
//!
//! Walk-ins and reservations use two independent predicates over the same
//! tables:
//!
//! | Mode | Predicate | Ignores |
//! |------|-----------|---------|
//! | immediate (walk-in) | [`is_free_for_walk_in`] | reservation windows |
//! | scheduled (reservation) | [`is_free_at`] | `is_occupied` |
//!
//! A table reserved for tonight but empty right now is therefore offered to a
//! walk-in. Both modes pick the first feasible table from [`rank_candidates`].

use shared::models::{DiningTable, Reservation, ReservationStatus};

use super::window::OccupancyWindow;

/// Tables that can hold `party_size`, smallest capacity first, ties by table number
pub fn rank_candidates(tables: Vec<DiningTable>, party_size: i32) -> Vec<DiningTable> {
    let mut candidates: Vec<DiningTable> =
        tables.into_iter().filter(|t| t.fits(party_size)).collect();
    candidates.sort_by_key(|t| (t.capacity, t.table_number));
    candidates
}

/// Immediate-mode predicate
pub fn is_free_for_walk_in(table: &DiningTable) -> bool {
    !table.is_occupied
}

/// Scheduled-mode predicate
///
/// `reservations` may contain anything; only confirmed or pending
/// reservations on this table whose window overlaps the one at `at` block it.
pub fn is_free_at(table: &DiningTable, reservations: &[Reservation], at: i64) -> bool {
    let requested = OccupancyWindow::around(at);
    !reservations.iter().any(|r| {
        r.table_id == Some(table.id)
            && ReservationStatus::HOLDING.contains(&r.status)
            && OccupancyWindow::around(r.reservation_time).overlaps(&requested)
    })
}

/// First walk-in feasible table
pub fn select_for_walk_in(tables: Vec<DiningTable>, party_size: i32) -> Option<DiningTable> {
    rank_candidates(tables, party_size)
        .into_iter()
        .find(is_free_for_walk_in)
}

/// First table free around `at`
pub fn select_for_time(
    tables: Vec<DiningTable>,
    reservations: &[Reservation],
    party_size: i32,
    at: i64,
) -> Option<DiningTable> {
    rank_candidates(tables, party_size)
        .into_iter()
        .find(|t| is_free_at(t, reservations, at))
}
