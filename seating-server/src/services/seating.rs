//! Seating Service - front-of-house workflows on top of the allocation engine
//!
//! Owns the SQLite pool and an [`AllocationEngine`] over [`SqliteStore`].
//! Plain CRUD goes straight to the repositories; anything that hands out a
//! table goes through the engine.
//!
//! # Reservation status updates
//!
//! | Current \ Target | pending | confirmed | seated | cancelled |
//! |------------------|---------|-----------|--------|-----------|
//! | pending | no-op | engine confirm | needs table (409) | cancel |
//! | confirmed | release table | allocate if no table, else no-op | seat if table | cancel, release table |
//! | seated | 409 | 409 | no-op | 409 |
//! | cancelled | 409 | 409 | 409 | no-op |

use std::sync::Arc;

use shared::models::{
    DashboardSummary, DiningTable, DiningTableCreate, DiningTableUpdate, Reservation,
    ReservationCreate, ReservationStatus, WaitlistCreate, WaitlistEntry, WaitlistJoined,
    WaitlistStatus,
};
use shared::util::{now_millis, utc_day_bounds};
use sqlx::SqlitePool;

use crate::allocation::AllocationEngine;
use crate::db::SqliteStore;
use crate::db::repository::{RepoError, dining_table, reservation, waitlist};
use crate::utils::time::{parse_reservation_time, validate_not_past};
use crate::utils::validation::{validate_party, validate_positive};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Tables created on first start when the floor is empty: `(table_number, capacity)`
pub const DEFAULT_TABLES: [(i32, i32); 6] = [(1, 2), (2, 2), (3, 4), (4, 4), (5, 6), (6, 8)];

#[derive(Clone, Debug)]
pub struct SeatingService {
    pool: SqlitePool,
    engine: AllocationEngine,
}

impl SeatingService {
    pub fn new(pool: SqlitePool) -> Self {
        let engine = AllocationEngine::new(Arc::new(SqliteStore::new(pool.clone())));
        Self { pool, engine }
    }

    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    /// Create [`DEFAULT_TABLES`] if no table exists yet; returns how many were created
    pub async fn seed_default_tables(&self) -> AppResult<usize> {
        if !dining_table::find_all(&self.pool).await?.is_empty() {
            return Ok(0);
        }
        for (table_number, capacity) in DEFAULT_TABLES {
            dining_table::create(&self.pool, DiningTableCreate { table_number, capacity }).await?;
        }
        tracing::info!(count = DEFAULT_TABLES.len(), "Default tables seeded");
        Ok(DEFAULT_TABLES.len())
    }

    // ==================== Tables ====================

    pub async fn list_tables(&self) -> AppResult<Vec<DiningTable>> {
        Ok(dining_table::find_all(&self.pool).await?)
    }

    pub async fn create_table(&self, data: DiningTableCreate) -> AppResult<DiningTable> {
        validate_positive(data.table_number, "table_number")?;
        validate_positive(data.capacity, "capacity")?;

        let table_number = data.table_number;
        let table = dining_table::create(&self.pool, data)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => AppError::with_message(
                    ErrorCode::TableNumberExists,
                    format!("Table {table_number} already exists"),
                ),
                other => other.into(),
            })?;

        tracing::info!(table_id = table.id, table_number, capacity = table.capacity, "Table created");
        Ok(table)
    }

    /// Partial update; `is_occupied = false` is how a table is released
    pub async fn update_table(&self, id: i64, data: DiningTableUpdate) -> AppResult<DiningTable> {
        if let Some(capacity) = data.capacity {
            validate_positive(capacity, "capacity")?;
        }

        let table = dining_table::update(&self.pool, id, data)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => AppError::with_message(
                    ErrorCode::TableNotFound,
                    format!("Table {id} not found"),
                ),
                other => other.into(),
            })?;

        tracing::info!(
            table_id = id,
            capacity = table.capacity,
            is_occupied = table.is_occupied,
            "Table updated"
        );
        Ok(table)
    }

    // ==================== Reservations ====================

    pub async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        Ok(reservation::find_all(&self.pool).await?)
    }

    /// Store a pending reservation and try to confirm it right away
    ///
    /// A reservation that finds no table stays pending; that is still a
    /// successful creation.
    pub async fn create_reservation(&self, data: ReservationCreate) -> AppResult<Reservation> {
        validate_party(&data.customer_name, &data.phone_number, &data.email, data.party_size)?;
        let at = parse_reservation_time(&data.reservation_time)?;
        validate_not_past(at, now_millis())?;

        let created = reservation::create(&self.pool, &data, at).await?;
        tracing::info!(
            reservation_id = created.id,
            party_size = created.party_size,
            reservation_time = at,
            "Reservation created"
        );

        match self.engine.confirm_pending_reservation(created.id).await {
            Ok(Ok(_)) => {}
            Ok(Err(rejection)) => {
                tracing::info!(reservation_id = created.id, reason = %rejection, "Reservation left pending");
            }
            Err(e) => {
                tracing::warn!(reservation_id = created.id, error = %e, "Auto-confirm failed, reservation left pending");
            }
        }

        self.load_reservation(created.id).await
    }

    pub async fn update_reservation_status(
        &self,
        id: i64,
        target: ReservationStatus,
    ) -> AppResult<Reservation> {
        use ReservationStatus::*;

        let current = self.load_reservation(id).await?;

        match (current.status, target) {
            (Pending, Confirmed) => {
                self.engine.confirm_pending_reservation(id).await??;
            }
            (Confirmed, Confirmed) if current.table_id.is_none() => {
                self.engine.allocate_table_for_reservation(id).await??;
            }
            (from, to) if from == to => {}
            (Seated | Cancelled, _) => {
                return Err(AppError::with_message(
                    ErrorCode::ReservationNotPending,
                    format!("Reservation is already {}", current.status),
                ));
            }
            (_, Seated) if current.table_id.is_none() => {
                return Err(AppError::new(ErrorCode::ReservationHasNoTable));
            }
            (from, to) => {
                if !reservation::transition_status(&self.pool, id, from, to).await? {
                    return Err(AppError::with_message(
                        ErrorCode::AllocationConflict,
                        "Reservation changed while updating, please retry",
                    ));
                }
                tracing::info!(reservation_id = id, from = %from, to = %to, "Reservation status changed");
            }
        }

        self.load_reservation(id).await
    }

    async fn load_reservation(&self, id: i64) -> AppResult<Reservation> {
        reservation::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))
    }

    // ==================== Waitlist ====================

    pub async fn list_waitlist(&self) -> AppResult<Vec<WaitlistEntry>> {
        Ok(waitlist::find_waiting(&self.pool).await?)
    }

    /// Add a walk-in party and seat it immediately when a table is free
    pub async fn join_waitlist(&self, data: WaitlistCreate) -> AppResult<WaitlistJoined> {
        validate_party(&data.customer_name, &data.phone_number, &data.email, data.party_size)?;

        let now = now_millis();
        let estimate = self.engine.estimate_wait_time_at(data.party_size, now).await?;
        let entry = waitlist::create(&self.pool, &data, now, estimate).await?;
        tracing::info!(
            waitlist_id = entry.id,
            party_size = entry.party_size,
            estimated_wait_time = estimate,
            "Party joined waitlist"
        );

        let message = match self.engine.seat_waitlist_party(entry.id).await {
            Ok(Ok(allocation)) => Some(allocation.message),
            Ok(Err(_)) => None,
            Err(e) => {
                tracing::warn!(waitlist_id = entry.id, error = %e, "Immediate seating failed, party keeps waiting");
                None
            }
        };

        let waitlist = self.load_waitlist_entry(entry.id).await?;
        Ok(WaitlistJoined { message, waitlist })
    }

    pub async fn update_waitlist_status(
        &self,
        id: i64,
        target: WaitlistStatus,
    ) -> AppResult<WaitlistEntry> {
        let current = self.load_waitlist_entry(id).await?;

        match target {
            WaitlistStatus::Seated => {
                self.engine.seat_waitlist_party(id).await??;
            }
            WaitlistStatus::Waiting => {
                return Err(AppError::with_message(
                    ErrorCode::WaitlistInvalidStatus,
                    "A party cannot be moved back to waiting",
                ));
            }
            WaitlistStatus::Notified | WaitlistStatus::Left => {
                if current.status.is_terminal() {
                    return Err(AppError::with_message(
                        ErrorCode::WaitlistInvalidStatus,
                        format!("Party is already {}", current.status),
                    ));
                }
                if current.status != target {
                    let from = [WaitlistStatus::Waiting, WaitlistStatus::Notified];
                    if !waitlist::transition_status(&self.pool, id, &from, target).await? {
                        return Err(AppError::with_message(
                            ErrorCode::AllocationConflict,
                            "Waitlist entry changed while updating, please retry",
                        ));
                    }
                    tracing::info!(waitlist_id = id, from = %current.status, to = %target, "Waitlist status changed");
                }
            }
        }

        self.load_waitlist_entry(id).await
    }

    async fn load_waitlist_entry(&self, id: i64) -> AppResult<WaitlistEntry> {
        waitlist::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::WaitlistEntryNotFound))
    }

    // ==================== Dashboard ====================

    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        self.dashboard_at(now_millis()).await
    }

    /// Counters for the UTC day containing `now`
    pub async fn dashboard_at(&self, now: i64) -> AppResult<DashboardSummary> {
        let (day_start, day_end) = utc_day_bounds(now);
        let today_reservations = reservation::count_between(&self.pool, day_start, day_end).await?;
        let (total_tables, occupied_tables) = dining_table::count_occupancy(&self.pool).await?;
        let waitlist_count = waitlist::count_waiting(&self.pool).await?;

        Ok(DashboardSummary {
            today_reservations,
            total_tables,
            occupied_tables,
            available_tables: total_tables - occupied_tables,
            waitlist_count,
        })
    }
}
