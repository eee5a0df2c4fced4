//! Allocation engine operations
//!
//! Every mutating operation is read → decide → commit. Decisions within one
//! process are serialized by `allocation_lock`; writes from elsewhere are
//! caught by the guarded commit, after which the decision is re-made from
//! fresh reads.

use std::future::Future;
use std::sync::Arc;

use shared::error::ErrorCode;
use shared::models::{DiningTable, ReservationStatus, WaitlistStatus};
use shared::util::now_millis;
use tokio::sync::Mutex;

use super::availability;
use super::outcome::{Allocation, AllocationOutcome, EngineError, EngineResult, Rejection};
use super::store::{ChangeSet, Mutation, SeatingStore, StoreError};
use super::wait_time::estimate_wait_minutes;
use super::window::OccupancyWindow;

/// Attempts per operation before a commit conflict is reported
pub const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Table allocation engine
#[derive(Clone)]
pub struct AllocationEngine {
    store: Arc<dyn SeatingStore>,
    /// Serializes allocation decisions
    allocation_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for AllocationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationEngine").finish_non_exhaustive()
    }
}

impl AllocationEngine {
    pub fn new(store: Arc<dyn SeatingStore>) -> Self {
        Self {
            store,
            allocation_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &Arc<dyn SeatingStore> {
        &self.store
    }

    /// Smallest table that can serve `party_size`
    ///
    /// With `at` the search is scheduled (reservation windows, occupancy
    /// ignored); without it the search is immediate (occupancy only).
    /// `Ok(None)` means no table is available.
    pub async fn find_available_table(
        &self,
        party_size: i32,
        at: Option<i64>,
    ) -> EngineResult<Option<DiningTable>> {
        let tables = self.store.tables_with_capacity(party_size).await?;
        let Some(at) = at else {
            return Ok(availability::select_for_walk_in(tables, party_size));
        };

        let requested = OccupancyWindow::around(at);
        for table in availability::rank_candidates(tables, party_size) {
            let holds = self
                .store
                .reservations_on_table(
                    table.id,
                    &ReservationStatus::HOLDING,
                    requested.conflicting_times(),
                )
                .await?;
            if availability::is_free_at(&table, &holds, at) {
                return Ok(Some(table));
            }
        }
        Ok(None)
    }

    /// Assign a table to a confirmed reservation that has none
    pub async fn allocate_table_for_reservation(
        &self,
        reservation_id: i64,
    ) -> EngineResult<AllocationOutcome> {
        self.retrying("allocate_table_for_reservation", move || {
            self.try_allocate(reservation_id)
        })
        .await
    }

    /// Promote a pending reservation to confirmed with a table, in one commit
    ///
    /// When no table is free the reservation stays pending.
    pub async fn confirm_pending_reservation(
        &self,
        reservation_id: i64,
    ) -> EngineResult<AllocationOutcome> {
        self.retrying("confirm_pending_reservation", move || {
            self.try_confirm(reservation_id)
        })
        .await
    }

    /// Seat a waiting walk-in party: table occupied and entry seated together
    pub async fn seat_waitlist_party(&self, waitlist_id: i64) -> EngineResult<AllocationOutcome> {
        self.retrying("seat_waitlist_party", move || self.try_seat(waitlist_id))
            .await
    }

    /// Estimated wait in minutes for a party joining now
    pub async fn estimate_wait_time(&self, party_size: i32) -> EngineResult<i32> {
        self.estimate_wait_time_at(party_size, now_millis()).await
    }

    /// Estimated wait in minutes for a party joining at `now`
    ///
    /// Counts waiting parties no larger than `party_size` that joined strictly
    /// before `now`, against every table large enough regardless of occupancy.
    pub async fn estimate_wait_time_at(&self, party_size: i32, now: i64) -> EngineResult<i32> {
        let waiting_ahead = self
            .store
            .waiting_entries()
            .await?
            .iter()
            .filter(|e| e.party_size <= party_size && e.joined_at < now)
            .count();
        let suitable_tables = self.store.tables_with_capacity(party_size).await?.len();
        Ok(estimate_wait_minutes(waiting_ahead, suitable_tables))
    }

    // ========== Internals ==========

    async fn retrying<F, Fut>(
        &self,
        operation: &'static str,
        mut attempt: F,
    ) -> EngineResult<AllocationOutcome>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = EngineResult<AllocationOutcome>>,
    {
        let _guard = self.allocation_lock.lock().await;

        for n in 1..=MAX_COMMIT_ATTEMPTS {
            match attempt().await {
                Err(EngineError::Store(StoreError::Conflict(reason))) => {
                    tracing::warn!(operation, attempt = n, reason = %reason, "Allocation commit conflict, re-deciding");
                }
                other => return other,
            }
        }

        tracing::error!(operation, attempts = MAX_COMMIT_ATTEMPTS, "Allocation retries exhausted");
        Err(EngineError::ConflictRetriesExhausted {
            operation,
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }

    async fn try_allocate(&self, reservation_id: i64) -> EngineResult<AllocationOutcome> {
        let Some(reservation) = self.store.find_reservation(reservation_id).await? else {
            return Ok(Err(Rejection::not_found(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            )));
        };
        if reservation.status != ReservationStatus::Confirmed {
            return Ok(Err(Rejection::invalid_state(
                ErrorCode::ReservationNotConfirmed,
                "Reservation is not confirmed",
            )));
        }
        if let Some(table_id) = reservation.table_id {
            return Ok(Err(self.already_assigned(table_id).await?));
        }

        let Some(table) = self
            .find_available_table(reservation.party_size, Some(reservation.reservation_time))
            .await?
        else {
            return Ok(Err(Rejection::no_table("No suitable table available")));
        };

        self.store
            .commit(ChangeSet::new().with(Mutation::AssignReservationTable {
                reservation_id,
                table_id: table.id,
                expected_status: ReservationStatus::Confirmed,
                new_status: ReservationStatus::Confirmed,
                conflicting_times: OccupancyWindow::around(reservation.reservation_time)
                    .conflicting_times(),
            }))
            .await?;

        tracing::info!(
            reservation_id,
            table_id = table.id,
            table_number = table.table_number,
            "Table assigned to reservation"
        );
        Ok(Ok(Allocation::reservation(table)))
    }

    async fn try_confirm(&self, reservation_id: i64) -> EngineResult<AllocationOutcome> {
        let Some(reservation) = self.store.find_reservation(reservation_id).await? else {
            return Ok(Err(Rejection::not_found(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            )));
        };
        if reservation.status != ReservationStatus::Pending {
            return Ok(Err(Rejection::invalid_state(
                ErrorCode::ReservationNotPending,
                format!("Reservation is already {}", reservation.status),
            )));
        }

        let Some(table) = self
            .find_available_table(reservation.party_size, Some(reservation.reservation_time))
            .await?
        else {
            tracing::debug!(reservation_id, "No table for pending reservation, left pending");
            return Ok(Err(Rejection::no_table("No suitable table available")));
        };

        self.store
            .commit(ChangeSet::new().with(Mutation::AssignReservationTable {
                reservation_id,
                table_id: table.id,
                expected_status: ReservationStatus::Pending,
                new_status: ReservationStatus::Confirmed,
                conflicting_times: OccupancyWindow::around(reservation.reservation_time)
                    .conflicting_times(),
            }))
            .await?;

        tracing::info!(
            reservation_id,
            table_id = table.id,
            table_number = table.table_number,
            "Reservation confirmed"
        );
        Ok(Ok(Allocation::reservation(table)))
    }

    async fn try_seat(&self, waitlist_id: i64) -> EngineResult<AllocationOutcome> {
        let Some(entry) = self.store.find_waitlist_entry(waitlist_id).await? else {
            return Ok(Err(Rejection::not_found(
                ErrorCode::WaitlistEntryNotFound,
                "Waitlist entry not found",
            )));
        };
        if entry.status != WaitlistStatus::Waiting {
            return Ok(Err(Rejection::invalid_state(
                ErrorCode::WaitlistInvalidStatus,
                format!("Party is already {}", entry.status),
            )));
        }

        let Some(mut table) = self.find_available_table(entry.party_size, None).await? else {
            return Ok(Err(Rejection::no_table(
                "No suitable table available at this time",
            )));
        };

        self.store
            .commit(
                ChangeSet::new()
                    .with(Mutation::OccupyTable { table_id: table.id })
                    .with(Mutation::SetWaitlistStatus {
                        entry_id: waitlist_id,
                        from: WaitlistStatus::Waiting,
                        to: WaitlistStatus::Seated,
                    }),
            )
            .await?;
        table.is_occupied = true;

        tracing::info!(
            waitlist_id,
            table_id = table.id,
            party_size = entry.party_size,
            "Party seated"
        );
        Ok(Ok(Allocation::seating(table)))
    }

    async fn already_assigned(&self, table_id: i64) -> EngineResult<Rejection> {
        let label = match self.store.find_table(table_id).await? {
            Some(t) => t.table_number.to_string(),
            None => format!("#{table_id}"),
        };
        Ok(Rejection::invalid_state(
            ErrorCode::ReservationAlreadyAssigned,
            format!("Reservation already has table {label} assigned"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::memory::MemoryStore;
    use crate::allocation::outcome::RejectionKind;
    use crate::allocation::store::StoreResult;
    use async_trait::async_trait;
    use shared::models::{Reservation, WaitlistEntry};
    use std::sync::atomic::{AtomicU32, Ordering};

    const HOUR: i64 = 60 * 60 * 1000;

    /// Capacities 2,2,4,4,6,8 numbered 1..=6
    fn seeded() -> (Arc<MemoryStore>, Vec<DiningTable>) {
        let store = Arc::new(MemoryStore::new());
        let tables = [2, 2, 4, 4, 6, 8]
            .into_iter()
            .enumerate()
            .map(|(i, cap)| store.add_table(i as i32 + 1, cap))
            .collect();
        (store, tables)
    }

    fn engine(store: &Arc<MemoryStore>) -> AllocationEngine {
        AllocationEngine::new(store.clone())
    }

    fn reservation(party_size: i32, at: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id: 0,
            customer_name: "Grace".to_string(),
            phone_number: "555-0199".to_string(),
            email: Some("grace@example.com".to_string()),
            party_size,
            reservation_time: at,
            created_at: 0,
            status,
            table_id: None,
        }
    }

    fn waiting(party_size: i32, joined_at: i64) -> WaitlistEntry {
        WaitlistEntry {
            id: 0,
            customer_name: "Alan".to_string(),
            phone_number: "555-0142".to_string(),
            email: None,
            party_size,
            joined_at,
            status: WaitlistStatus::Waiting,
            estimated_wait_time: Some(15),
        }
    }

    // ========== find_available_table ==========

    #[tokio::test]
    async fn test_party_of_four_gets_lower_numbered_four_top() {
        let (store, _) = seeded();
        let engine = engine(&store);

        let walk_in = engine.find_available_table(4, None).await.unwrap().unwrap();
        assert_eq!((walk_in.capacity, walk_in.table_number), (4, 3));

        let scheduled = engine
            .find_available_table(4, Some(18 * HOUR))
            .await
            .unwrap()
            .unwrap();
        assert_eq!((scheduled.capacity, scheduled.table_number), (4, 3));
    }

    #[tokio::test]
    async fn test_party_of_ten_gets_nothing() {
        let (store, _) = seeded();
        let engine = engine(&store);
        assert!(engine.find_available_table(10, None).await.unwrap().is_none());
        assert!(engine
            .find_available_table(10, Some(18 * HOUR))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_immediate_mode_all_fitting_occupied() {
        let (store, tables) = seeded();
        for t in tables.iter().filter(|t| t.capacity >= 4) {
            store.set_occupied(t.id, true);
        }
        let engine = engine(&store);
        assert!(engine.find_available_table(4, None).await.unwrap().is_none());
        // Scheduled mode does not look at the flag
        assert!(engine
            .find_available_table(4, Some(18 * HOUR))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_scheduled_mode_skips_overlapping_window() {
        let (store, tables) = seeded();
        let mut held = reservation(4, 18 * HOUR, ReservationStatus::Confirmed);
        held.table_id = Some(tables[2].id);
        store.add_reservation(held);

        let engine = engine(&store);
        let t = engine
            .find_available_table(4, Some(19 * HOUR))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(t.table_number, 4);

        // Exactly 180 minutes apart still conflicts
        let t = engine
            .find_available_table(4, Some(21 * HOUR))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(t.table_number, 4);

        let t = engine
            .find_available_table(4, Some(21 * HOUR + 60_000))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(t.table_number, 3);
    }

    // ========== allocate_table_for_reservation ==========

    #[tokio::test]
    async fn test_allocate_sequential_reservations_use_different_tables() {
        let (store, _) = seeded();
        let engine = engine(&store);
        let a = store.add_reservation(reservation(4, 18 * HOUR, ReservationStatus::Confirmed));
        let b = store.add_reservation(reservation(4, 19 * HOUR, ReservationStatus::Confirmed));

        let first = engine.allocate_table_for_reservation(a.id).await.unwrap().unwrap();
        assert_eq!(first.message, "Table 3 assigned to reservation");
        let second = engine.allocate_table_for_reservation(b.id).await.unwrap().unwrap();
        assert_eq!(second.message, "Table 4 assigned to reservation");

        assert_eq!(store.reservation(a.id).unwrap().table_id, Some(first.table.id));
        assert_eq!(store.reservation(b.id).unwrap().table_id, Some(second.table.id));
    }

    #[tokio::test]
    async fn test_allocate_missing_reservation() {
        let (store, _) = seeded();
        let rejection = engine(&store)
            .allocate_table_for_reservation(999)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::NotFound);
        assert_eq!(rejection.reason, "Reservation not found");
    }

    #[tokio::test]
    async fn test_allocate_requires_confirmed() {
        let (store, _) = seeded();
        let r = store.add_reservation(reservation(2, 18 * HOUR, ReservationStatus::Pending));
        let rejection = engine(&store)
            .allocate_table_for_reservation(r.id)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::InvalidState);
        assert_eq!(rejection.reason, "Reservation is not confirmed");
        assert_eq!(store.reservation(r.id).unwrap().table_id, None);
    }

    #[tokio::test]
    async fn test_allocate_twice_is_rejected_without_mutation() {
        let (store, _) = seeded();
        let engine = engine(&store);
        let r = store.add_reservation(reservation(2, 18 * HOUR, ReservationStatus::Confirmed));

        let first = engine.allocate_table_for_reservation(r.id).await.unwrap().unwrap();
        let rejection = engine
            .allocate_table_for_reservation(r.id)
            .await
            .unwrap()
            .unwrap_err();

        assert_eq!(rejection.kind, RejectionKind::InvalidState);
        assert_eq!(
            rejection.reason,
            format!("Reservation already has table {} assigned", first.table.table_number)
        );
        assert_eq!(store.reservation(r.id).unwrap().table_id, Some(first.table.id));
    }

    #[tokio::test]
    async fn test_allocate_no_table() {
        let (store, _) = seeded();
        let r = store.add_reservation(reservation(10, 18 * HOUR, ReservationStatus::Confirmed));
        let rejection = engine(&store)
            .allocate_table_for_reservation(r.id)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::NoTableAvailable);
        assert_eq!(rejection.reason, "No suitable table available");
    }

    // ========== confirm_pending_reservation ==========

    #[tokio::test]
    async fn test_confirm_pending_assigns_and_confirms() {
        let (store, _) = seeded();
        let r = store.add_reservation(reservation(5, 18 * HOUR, ReservationStatus::Pending));

        let allocation = engine(&store)
            .confirm_pending_reservation(r.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(allocation.table.capacity, 6);

        let stored = store.reservation(r.id).unwrap();
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.table_id, Some(allocation.table.id));
    }

    #[tokio::test]
    async fn test_confirm_pending_no_table_stays_pending() {
        let (store, _) = seeded();
        let r = store.add_reservation(reservation(12, 18 * HOUR, ReservationStatus::Pending));

        let rejection = engine(&store)
            .confirm_pending_reservation(r.id)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::NoTableAvailable);

        let stored = store.reservation(r.id).unwrap();
        assert_eq!(stored.status, ReservationStatus::Pending);
        assert_eq!(stored.table_id, None);
    }

    #[tokio::test]
    async fn test_confirm_requires_pending() {
        let (store, _) = seeded();
        let r = store.add_reservation(reservation(2, 18 * HOUR, ReservationStatus::Cancelled));
        let rejection = engine(&store)
            .confirm_pending_reservation(r.id)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::InvalidState);
        assert_eq!(rejection.reason, "Reservation is already cancelled");
    }

    #[tokio::test]
    async fn test_pending_hold_blocks_scheduled_search() {
        // A pending reservation that somehow carries a table still holds it
        let (store, tables) = seeded();
        let mut pending = reservation(2, 18 * HOUR, ReservationStatus::Pending);
        pending.table_id = Some(tables[0].id);
        store.add_reservation(pending);

        let t = engine(&store)
            .find_available_table(2, Some(18 * HOUR))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(t.table_number, 2);
    }

    // ========== seat_waitlist_party ==========

    #[tokio::test]
    async fn test_seat_marks_table_and_entry_together() {
        let (store, _) = seeded();
        let e = store.add_waitlist_entry(waiting(3, 0));

        let allocation = engine(&store).seat_waitlist_party(e.id).await.unwrap().unwrap();
        assert_eq!(allocation.message, "Party seated at table 3");
        assert!(allocation.table.is_occupied);
        assert!(store.table(allocation.table.id).unwrap().is_occupied);
        assert_eq!(store.waitlist_entry(e.id).unwrap().status, WaitlistStatus::Seated);
    }

    #[tokio::test]
    async fn test_seat_twice_reports_status() {
        let (store, _) = seeded();
        let engine = engine(&store);
        let e = store.add_waitlist_entry(waiting(2, 0));

        engine.seat_waitlist_party(e.id).await.unwrap().unwrap();
        let rejection = engine.seat_waitlist_party(e.id).await.unwrap().unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::InvalidState);
        assert_eq!(rejection.reason, "Party is already seated");
    }

    #[tokio::test]
    async fn test_seat_missing_entry() {
        let (store, _) = seeded();
        let rejection = engine(&store)
            .seat_waitlist_party(42)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::NotFound);
        assert_eq!(rejection.reason, "Waitlist entry not found");
    }

    #[tokio::test]
    async fn test_seat_no_free_table_leaves_everything_untouched() {
        let (store, tables) = seeded();
        for t in &tables {
            store.set_occupied(t.id, true);
        }
        let e = store.add_waitlist_entry(waiting(2, 0));

        let rejection = engine(&store)
            .seat_waitlist_party(e.id)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::NoTableAvailable);
        assert_eq!(rejection.reason, "No suitable table available at this time");
        assert_eq!(store.waitlist_entry(e.id).unwrap().status, WaitlistStatus::Waiting);
    }

    #[tokio::test]
    async fn test_walk_in_can_take_table_reserved_for_later() {
        let (store, tables) = seeded();
        let mut tonight = reservation(2, 20 * HOUR, ReservationStatus::Confirmed);
        tonight.table_id = Some(tables[0].id);
        store.add_reservation(tonight);
        let e = store.add_waitlist_entry(waiting(2, 0));

        let allocation = engine(&store).seat_waitlist_party(e.id).await.unwrap().unwrap();
        assert_eq!(allocation.table.id, tables[0].id);
    }

    // ========== estimate_wait_time ==========

    #[tokio::test]
    async fn test_estimate_three_waiting_two_tables() {
        let store = Arc::new(MemoryStore::new());
        store.add_table(1, 4);
        store.add_table(2, 4);
        store.add_table(3, 2);
        for joined in [10, 20, 30] {
            store.add_waitlist_entry(waiting(4, joined));
        }
        // Larger parties are not ahead
        store.add_waitlist_entry(waiting(6, 5));

        let minutes = engine(&store).estimate_wait_time_at(4, 100).await.unwrap();
        assert_eq!(minutes, 22);
    }

    #[tokio::test]
    async fn test_estimate_ignores_later_joiners_and_occupancy() {
        let (store, tables) = seeded();
        for t in &tables {
            store.set_occupied(t.id, true);
        }
        store.add_waitlist_entry(waiting(2, 500));

        let minutes = engine(&store).estimate_wait_time_at(2, 500).await.unwrap();
        assert_eq!(minutes, 15);
    }

    #[tokio::test]
    async fn test_estimate_without_suitable_tables() {
        let (store, _) = seeded();
        store.add_waitlist_entry(waiting(9, 1));
        store.add_waitlist_entry(waiting(3, 2));

        let minutes = engine(&store).estimate_wait_time_at(9, 100).await.unwrap();
        assert_eq!(minutes, 30);
    }

    // ========== Concurrency ==========

    /// Lets another writer take the chosen table right before the first commits
    struct RacingStore {
        inner: Arc<MemoryStore>,
        stolen_table: i64,
        raced: AtomicU32,
    }

    #[async_trait]
    impl SeatingStore for RacingStore {
        async fn tables_with_capacity(&self, min: i32) -> StoreResult<Vec<DiningTable>> {
            self.inner.tables_with_capacity(min).await
        }
        async fn find_table(&self, id: i64) -> StoreResult<Option<DiningTable>> {
            self.inner.find_table(id).await
        }
        async fn reservations_on_table(
            &self,
            table_id: i64,
            statuses: &[ReservationStatus],
            range: OccupancyWindow,
        ) -> StoreResult<Vec<Reservation>> {
            self.inner.reservations_on_table(table_id, statuses, range).await
        }
        async fn find_reservation(&self, id: i64) -> StoreResult<Option<Reservation>> {
            self.inner.find_reservation(id).await
        }
        async fn find_waitlist_entry(&self, id: i64) -> StoreResult<Option<WaitlistEntry>> {
            self.inner.find_waitlist_entry(id).await
        }
        async fn waiting_entries(&self) -> StoreResult<Vec<WaitlistEntry>> {
            self.inner.waiting_entries().await
        }
        async fn commit(&self, changes: ChangeSet) -> StoreResult<()> {
            if self.raced.fetch_add(1, Ordering::SeqCst) == 0 {
                self.inner.set_occupied(self.stolen_table, true);
            }
            self.inner.commit(changes).await
        }
    }

    /// Every commit conflicts
    struct ContendedStore(Arc<MemoryStore>);

    #[async_trait]
    impl SeatingStore for ContendedStore {
        async fn tables_with_capacity(&self, min: i32) -> StoreResult<Vec<DiningTable>> {
            self.0.tables_with_capacity(min).await
        }
        async fn find_table(&self, id: i64) -> StoreResult<Option<DiningTable>> {
            self.0.find_table(id).await
        }
        async fn reservations_on_table(
            &self,
            table_id: i64,
            statuses: &[ReservationStatus],
            range: OccupancyWindow,
        ) -> StoreResult<Vec<Reservation>> {
            self.0.reservations_on_table(table_id, statuses, range).await
        }
        async fn find_reservation(&self, id: i64) -> StoreResult<Option<Reservation>> {
            self.0.find_reservation(id).await
        }
        async fn find_waitlist_entry(&self, id: i64) -> StoreResult<Option<WaitlistEntry>> {
            self.0.find_waitlist_entry(id).await
        }
        async fn waiting_entries(&self) -> StoreResult<Vec<WaitlistEntry>> {
            self.0.waiting_entries().await
        }
        async fn commit(&self, _changes: ChangeSet) -> StoreResult<()> {
            Err(StoreError::Conflict("always".to_string()))
        }
    }

    #[tokio::test]
    async fn test_conflict_re_decides_on_fresh_state() {
        let (store, tables) = seeded();
        let e = store.add_waitlist_entry(waiting(4, 0));
        let racing = Arc::new(RacingStore {
            inner: store.clone(),
            stolen_table: tables[2].id,
            raced: AtomicU32::new(0),
        });

        let allocation = AllocationEngine::new(racing.clone())
            .seat_waitlist_party(e.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(allocation.table.table_number, 4);
        assert_eq!(racing.raced.load(Ordering::SeqCst), 2);
        assert_eq!(store.waitlist_entry(e.id).unwrap().status, WaitlistStatus::Seated);
    }

    #[tokio::test]
    async fn test_conflict_retries_exhausted() {
        let (store, _) = seeded();
        let e = store.add_waitlist_entry(waiting(2, 0));
        let engine = AllocationEngine::new(Arc::new(ContendedStore(store.clone())));

        let err = engine.seat_waitlist_party(e.id).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::ConflictRetriesExhausted { attempts: MAX_COMMIT_ATTEMPTS, .. }
        ));
        assert_eq!(store.waitlist_entry(e.id).unwrap().status, WaitlistStatus::Waiting);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_seating_never_double_books() {
        let store = Arc::new(MemoryStore::new());
        store.add_table(1, 4);
        store.add_table(2, 4);
        let engine = engine(&store);

        let entries: Vec<_> = (0..6).map(|i| store.add_waitlist_entry(waiting(4, i))).collect();
        let handles: Vec<_> = entries
            .iter()
            .map(|e| {
                let engine = engine.clone();
                let id = e.id;
                tokio::spawn(async move { engine.seat_waitlist_party(id).await })
            })
            .collect();

        let mut seated_tables = Vec::new();
        for handle in handles {
            if let Ok(allocation) = handle.await.unwrap().unwrap() {
                seated_tables.push(allocation.table.id);
            }
        }
        seated_tables.sort_unstable();
        seated_tables.dedup();
        assert_eq!(seated_tables.len(), 2);

        let seated = entries
            .iter()
            .filter(|e| store.waitlist_entry(e.id).unwrap().status == WaitlistStatus::Seated)
            .count();
        assert_eq!(seated, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reservations_same_slot() {
        let store = Arc::new(MemoryStore::new());
        store.add_table(1, 4);
        let engine = engine(&store);
        let a = store.add_reservation(reservation(4, 18 * HOUR, ReservationStatus::Confirmed));
        let b = store.add_reservation(reservation(4, 18 * HOUR, ReservationStatus::Confirmed));

        let (ra, rb) = tokio::join!(
            engine.allocate_table_for_reservation(a.id),
            engine.allocate_table_for_reservation(b.id)
        );
        let successes = [ra.unwrap(), rb.unwrap()]
            .into_iter()
            .filter(Result::is_ok)
            .count();
        assert_eq!(successes, 1);
    }
}
