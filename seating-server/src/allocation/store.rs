//! Storage contract of the allocation engine
//!
//! Reads are plain queries. Writes go through [`SeatingStore::commit`] as a
//! [`ChangeSet`] of guarded [`Mutation`]s: the store checks every guard and
//! applies every mutation in one unit, or rejects the whole set with
//! [`StoreError::Conflict`].

use async_trait::async_trait;
use shared::models::{DiningTable, Reservation, ReservationStatus, WaitlistEntry, WaitlistStatus};
use thiserror::Error;

use super::window::OccupancyWindow;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A guard no longer holds; nothing was written
    #[error("Commit conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Database(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One guarded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Set `table_id` and status of a reservation
    ///
    /// Guards: reservation still has status `expected_status` and no table,
    /// and no other confirmed/pending reservation on `table_id` has its
    /// `reservation_time` inside `conflicting_times`.
    AssignReservationTable {
        reservation_id: i64,
        table_id: i64,
        expected_status: ReservationStatus,
        new_status: ReservationStatus,
        conflicting_times: OccupancyWindow,
    },
    /// Mark a table occupied. Guard: it is currently unoccupied.
    OccupyTable { table_id: i64 },
    /// Move a waitlist entry. Guard: it is currently in `from`.
    SetWaitlistStatus {
        entry_id: i64,
        from: WaitlistStatus,
        to: WaitlistStatus,
    },
}

/// Mutations committed together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    mutations: Vec<Mutation>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

/// Query and commit contract
#[async_trait]
pub trait SeatingStore: Send + Sync {
    /// Tables with `capacity >= min_capacity`, ordered by capacity then table number
    async fn tables_with_capacity(&self, min_capacity: i32) -> StoreResult<Vec<DiningTable>>;

    async fn find_table(&self, id: i64) -> StoreResult<Option<DiningTable>>;

    /// Reservations on `table_id` in one of `statuses` whose time lies in `range` (closed)
    async fn reservations_on_table(
        &self,
        table_id: i64,
        statuses: &[ReservationStatus],
        range: OccupancyWindow,
    ) -> StoreResult<Vec<Reservation>>;

    async fn find_reservation(&self, id: i64) -> StoreResult<Option<Reservation>>;

    async fn find_waitlist_entry(&self, id: i64) -> StoreResult<Option<WaitlistEntry>>;

    /// Entries with status waiting, oldest first
    async fn waiting_entries(&self) -> StoreResult<Vec<WaitlistEntry>>;

    /// Apply all mutations atomically, or none
    async fn commit(&self, changes: ChangeSet) -> StoreResult<()>;
}
