//! Waitlist Repository

use super::{RepoError, RepoResult};
use shared::models::{WaitlistCreate, WaitlistEntry, WaitlistStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, customer_name, phone_number, email, party_size, joined_at, status, estimated_wait_time FROM waitlist";

/// Waiting entries, oldest first
pub async fn find_waiting(pool: &SqlitePool) -> RepoResult<Vec<WaitlistEntry>> {
    let sql = format!("{SELECT} WHERE status = 'waiting' ORDER BY joined_at, id");
    let rows = sqlx::query_as::<_, WaitlistEntry>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<WaitlistEntry>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, WaitlistEntry>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a waiting entry
pub async fn create(
    pool: &SqlitePool,
    data: &WaitlistCreate,
    joined_at: i64,
    estimated_wait_time: i32,
) -> RepoResult<WaitlistEntry> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO waitlist (customer_name, phone_number, email, party_size, joined_at, status, estimated_wait_time) VALUES (?1, ?2, ?3, ?4, ?5, 'waiting', ?6) RETURNING id",
    )
    .bind(&data.customer_name)
    .bind(&data.phone_number)
    .bind(&data.email)
    .bind(data.party_size)
    .bind(joined_at)
    .bind(estimated_wait_time)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create waitlist entry".into()))
}

/// Move an entry to `to` if its status is one of `from`
///
/// Returns `false` when the entry is missing or in another status.
pub async fn transition_status<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    from: &[WaitlistStatus],
    to: WaitlistStatus,
) -> RepoResult<bool> {
    if from.is_empty() {
        return Ok(false);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE waitlist SET status = ");
    qb.push_bind(to)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND status IN (");
    let mut separated = qb.separated(", ");
    for status in from {
        separated.push_bind(*status);
    }
    separated.push_unseparated(")");

    let rows = qb.build().execute(executor).await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn count_waiting(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist WHERE status = 'waiting'")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
