//! Reservation Repository

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationCreate, ReservationStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, customer_name, phone_number, email, party_size, reservation_time, created_at, status, table_id FROM reservation";

/// All reservations ordered by time
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Reservation>> {
    let sql = format!("{SELECT} ORDER BY reservation_time, id");
    let rows = sqlx::query_as::<_, Reservation>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Reservations on a table in one of `statuses` with time in `[from, to]`
pub async fn find_on_table(
    pool: &SqlitePool,
    table_id: i64,
    statuses: &[ReservationStatus],
    from: i64,
    to: i64,
) -> RepoResult<Vec<Reservation>> {
    if statuses.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT);
    qb.push(" WHERE table_id = ")
        .push_bind(table_id)
        .push(" AND reservation_time BETWEEN ")
        .push_bind(from)
        .push(" AND ")
        .push_bind(to)
        .push(" AND status IN (");
    let mut separated = qb.separated(", ");
    for status in statuses {
        separated.push_bind(*status);
    }
    separated.push_unseparated(") ORDER BY reservation_time");

    let rows = qb.build_query_as::<Reservation>().fetch_all(pool).await?;
    Ok(rows)
}

/// Insert a pending reservation without a table
pub async fn create(
    pool: &SqlitePool,
    data: &ReservationCreate,
    reservation_time: i64,
) -> RepoResult<Reservation> {
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reservation (customer_name, phone_number, email, party_size, reservation_time, created_at, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'pending') RETURNING id",
    )
    .bind(&data.customer_name)
    .bind(&data.phone_number)
    .bind(&data.email)
    .bind(data.party_size)
    .bind(reservation_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Change status when it is still `from`
///
/// Statuses that cannot carry a table (pending, cancelled) clear `table_id`
/// in the same statement. Returns `false` when the guard failed.
pub async fn transition_status(
    pool: &SqlitePool,
    id: i64,
    from: ReservationStatus,
    to: ReservationStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?1, table_id = CASE WHEN ?2 THEN table_id ELSE NULL END WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(to.may_have_table())
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Reservations whose time falls in `[from, to)`
pub async fn count_between(pool: &SqlitePool, from: i64, to: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation WHERE reservation_time >= ?1 AND reservation_time < ?2",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Assign a table if nothing changed since the decision
///
/// The reservation must still be in `expected` without a table, and no other
/// confirmed or pending reservation on `table_id` may have its time inside
/// `[conflict_from, conflict_to]`. Returns `false` when any guard failed.
pub async fn assign_table_guarded<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    table_id: i64,
    expected: ReservationStatus,
    new_status: ReservationStatus,
    conflict_from: i64,
    conflict_to: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE reservation SET table_id = ?1, status = ?2 \
         WHERE id = ?3 AND status = ?4 AND table_id IS NULL \
         AND NOT EXISTS ( \
             SELECT 1 FROM reservation other \
             WHERE other.table_id = ?1 AND other.id != ?3 \
             AND other.status IN ('confirmed', 'pending') \
             AND other.reservation_time BETWEEN ?5 AND ?6 \
         )",
    )
    .bind(table_id)
    .bind(new_status)
    .bind(id)
    .bind(expected)
    .bind(conflict_from)
    .bind(conflict_to)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() == 1)
}
