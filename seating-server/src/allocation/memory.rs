//! In-process seating store
//!
//! Backs engine tests and any embedding that does not need durability.
//! A single `parking_lot::RwLock` guards all three collections, so a commit
//! checks and applies its change set under one write lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{DiningTable, Reservation, ReservationStatus, WaitlistEntry, WaitlistStatus};

use super::store::{ChangeSet, Mutation, SeatingStore, StoreError, StoreResult};
use super::window::OccupancyWindow;

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<i64, DiningTable>,
    reservations: BTreeMap<i64, Reservation>,
    waitlist: BTreeMap<i64, WaitlistEntry>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self, mutation: &Mutation) -> StoreResult<()> {
        match mutation {
            Mutation::AssignReservationTable {
                reservation_id,
                table_id,
                expected_status,
                conflicting_times,
                ..
            } => {
                let reservation = self
                    .reservations
                    .get(reservation_id)
                    .ok_or_else(|| StoreError::Conflict(format!("reservation {reservation_id} vanished")))?;
                if reservation.status != *expected_status || reservation.table_id.is_some() {
                    return Err(StoreError::Conflict(format!(
                        "reservation {reservation_id} changed"
                    )));
                }
                if !self.tables.contains_key(table_id) {
                    return Err(StoreError::Conflict(format!("table {table_id} vanished")));
                }
                let clash = self.reservations.values().any(|r| {
                    r.id != *reservation_id
                        && r.table_id == Some(*table_id)
                        && ReservationStatus::HOLDING.contains(&r.status)
                        && conflicting_times.contains(r.reservation_time)
                });
                if clash {
                    return Err(StoreError::Conflict(format!(
                        "table {table_id} was reserved for an overlapping window"
                    )));
                }
            }
            Mutation::OccupyTable { table_id } => match self.tables.get(table_id) {
                Some(t) if !t.is_occupied => {}
                _ => {
                    return Err(StoreError::Conflict(format!(
                        "table {table_id} is no longer free"
                    )));
                }
            },
            Mutation::SetWaitlistStatus { entry_id, from, .. } => {
                match self.waitlist.get(entry_id) {
                    Some(e) if e.status == *from => {}
                    _ => {
                        return Err(StoreError::Conflict(format!(
                            "waitlist entry {entry_id} changed"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::AssignReservationTable {
                reservation_id,
                table_id,
                new_status,
                ..
            } => {
                if let Some(r) = self.reservations.get_mut(reservation_id) {
                    r.table_id = Some(*table_id);
                    r.status = *new_status;
                }
            }
            Mutation::OccupyTable { table_id } => {
                if let Some(t) = self.tables.get_mut(table_id) {
                    t.is_occupied = true;
                }
            }
            Mutation::SetWaitlistStatus { entry_id, to, .. } => {
                if let Some(e) = self.waitlist.get_mut(entry_id) {
                    e.status = *to;
                }
            }
        }
    }
}

/// `SeatingStore` held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Seeding ==========

    /// Add a table and return it with its assigned id
    pub fn add_table(&self, table_number: i32, capacity: i32) -> DiningTable {
        let mut state = self.state.write();
        let table = DiningTable {
            id: state.next_id(),
            table_number,
            capacity,
            is_occupied: false,
        };
        state.tables.insert(table.id, table.clone());
        table
    }

    /// Insert a reservation, replacing its `id` with a fresh one
    pub fn add_reservation(&self, mut reservation: Reservation) -> Reservation {
        let mut state = self.state.write();
        reservation.id = state.next_id();
        state.reservations.insert(reservation.id, reservation.clone());
        reservation
    }

    /// Insert a waitlist entry, replacing its `id` with a fresh one
    pub fn add_waitlist_entry(&self, mut entry: WaitlistEntry) -> WaitlistEntry {
        let mut state = self.state.write();
        entry.id = state.next_id();
        state.waitlist.insert(entry.id, entry.clone());
        entry
    }

    pub fn set_occupied(&self, table_id: i64, is_occupied: bool) {
        if let Some(t) = self.state.write().tables.get_mut(&table_id) {
            t.is_occupied = is_occupied;
        }
    }

    // ========== Snapshots ==========

    pub fn table(&self, id: i64) -> Option<DiningTable> {
        self.state.read().tables.get(&id).cloned()
    }

    pub fn reservation(&self, id: i64) -> Option<Reservation> {
        self.state.read().reservations.get(&id).cloned()
    }

    pub fn waitlist_entry(&self, id: i64) -> Option<WaitlistEntry> {
        self.state.read().waitlist.get(&id).cloned()
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.state.read().reservations.values().cloned().collect()
    }
}

#[async_trait]
impl SeatingStore for MemoryStore {
    async fn tables_with_capacity(&self, min_capacity: i32) -> StoreResult<Vec<DiningTable>> {
        let mut tables: Vec<DiningTable> = self
            .state
            .read()
            .tables
            .values()
            .filter(|t| t.capacity >= min_capacity)
            .cloned()
            .collect();
        tables.sort_by_key(|t| (t.capacity, t.table_number));
        Ok(tables)
    }

    async fn find_table(&self, id: i64) -> StoreResult<Option<DiningTable>> {
        Ok(self.table(id))
    }

    async fn reservations_on_table(
        &self,
        table_id: i64,
        statuses: &[ReservationStatus],
        range: OccupancyWindow,
    ) -> StoreResult<Vec<Reservation>> {
        Ok(self
            .state
            .read()
            .reservations
            .values()
            .filter(|r| {
                r.table_id == Some(table_id)
                    && statuses.contains(&r.status)
                    && range.contains(r.reservation_time)
            })
            .cloned()
            .collect())
    }

    async fn find_reservation(&self, id: i64) -> StoreResult<Option<Reservation>> {
        Ok(self.reservation(id))
    }

    async fn find_waitlist_entry(&self, id: i64) -> StoreResult<Option<WaitlistEntry>> {
        Ok(self.waitlist_entry(id))
    }

    async fn waiting_entries(&self) -> StoreResult<Vec<WaitlistEntry>> {
        let mut entries: Vec<WaitlistEntry> = self
            .state
            .read()
            .waitlist
            .values()
            .filter(|e| e.status == WaitlistStatus::Waiting)
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.joined_at, e.id));
        Ok(entries)
    }

    async fn commit(&self, changes: ChangeSet) -> StoreResult<()> {
        let mut state = self.state.write();
        for mutation in changes.mutations() {
            state.check(mutation)?;
        }
        for mutation in changes.mutations() {
            state.apply(mutation);
        }
        Ok(())
    }
}
