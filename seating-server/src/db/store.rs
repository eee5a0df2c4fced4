//! SQLite-backed seating store
//!
//! Reads delegate to the repositories. A commit runs every guarded write in
//! one transaction; the first write that touches no row rolls the whole
//! change set back as a conflict.

use async_trait::async_trait;
use shared::models::{DiningTable, Reservation, ReservationStatus, WaitlistEntry};
use sqlx::SqlitePool;

use super::repository::{self, RepoError};
use crate::allocation::{ChangeSet, Mutation, OccupancyWindow, SeatingStore, StoreError, StoreResult};

impl From<RepoError> for StoreError {
    fn from(err: RepoError) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeatingStore for SqliteStore {
    async fn tables_with_capacity(&self, min_capacity: i32) -> StoreResult<Vec<DiningTable>> {
        Ok(repository::dining_table::find_with_capacity(&self.pool, min_capacity).await?)
    }

    async fn find_table(&self, id: i64) -> StoreResult<Option<DiningTable>> {
        Ok(repository::dining_table::find_by_id(&self.pool, id).await?)
    }

    async fn reservations_on_table(
        &self,
        table_id: i64,
        statuses: &[ReservationStatus],
        range: OccupancyWindow,
    ) -> StoreResult<Vec<Reservation>> {
        Ok(
            repository::reservation::find_on_table(&self.pool, table_id, statuses, range.start, range.end)
                .await?,
        )
    }

    async fn find_reservation(&self, id: i64) -> StoreResult<Option<Reservation>> {
        Ok(repository::reservation::find_by_id(&self.pool, id).await?)
    }

    async fn find_waitlist_entry(&self, id: i64) -> StoreResult<Option<WaitlistEntry>> {
        Ok(repository::waitlist::find_by_id(&self.pool, id).await?)
    }

    async fn waiting_entries(&self) -> StoreResult<Vec<WaitlistEntry>> {
        Ok(repository::waitlist::find_waiting(&self.pool).await?)
    }

    async fn commit(&self, changes: ChangeSet) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        for mutation in changes.mutations() {
            let applied = match mutation {
                Mutation::AssignReservationTable {
                    reservation_id,
                    table_id,
                    expected_status,
                    new_status,
                    conflicting_times,
                } => {
                    repository::reservation::assign_table_guarded(
                        &mut *tx,
                        *reservation_id,
                        *table_id,
                        *expected_status,
                        *new_status,
                        conflicting_times.start,
                        conflicting_times.end,
                    )
                    .await?
                }
                Mutation::OccupyTable { table_id } => {
                    repository::dining_table::occupy_if_free(&mut *tx, *table_id).await?
                }
                Mutation::SetWaitlistStatus { entry_id, from, to } => {
                    repository::waitlist::transition_status(&mut *tx, *entry_id, &[*from], *to)
                        .await?
                }
            };

            if !applied {
                tx.rollback().await?;
                return Err(StoreError::Conflict(format!("guard failed: {mutation:?}")));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
