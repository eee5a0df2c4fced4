//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, table_number, capacity, is_occupied FROM dining_table";

/// All tables ordered by table number
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{SELECT} ORDER BY table_number");
    let rows = sqlx::query_as::<_, DiningTable>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_number(pool: &SqlitePool, table_number: i32) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{SELECT} WHERE table_number = ?");
    let row = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(table_number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Tables with `capacity >= min_capacity`, smallest first, ties by table number
pub async fn find_with_capacity(pool: &SqlitePool, min_capacity: i32) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{SELECT} WHERE capacity >= ? ORDER BY capacity, table_number");
    let rows = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(min_capacity)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if find_by_number(pool, data.table_number).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Table {} already exists",
            data.table_number
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO dining_table (table_number, capacity, is_occupied) VALUES (?1, ?2, 0) RETURNING id",
    )
    .bind(data.table_number)
    .bind(data.capacity)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

/// Partial update, absent fields keep their value
pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let rows = sqlx::query(
        "UPDATE dining_table SET capacity = COALESCE(?1, capacity), is_occupied = COALESCE(?2, is_occupied) WHERE id = ?3",
    )
    .bind(data.capacity)
    .bind(data.is_occupied)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// `(total, occupied)` table counts
pub async fn count_occupancy(pool: &SqlitePool) -> RepoResult<(i64, i64)> {
    let counts: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN is_occupied THEN 1 ELSE 0 END), 0) FROM dining_table",
    )
    .fetch_one(pool)
    .await?;
    Ok(counts)
}

/// Mark a table occupied if it is currently free
///
/// Returns `false` when the table is missing or already occupied.
pub async fn occupy_if_free<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE dining_table SET is_occupied = 1 WHERE id = ? AND is_occupied = 0")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    async fn seed(pool: &SqlitePool, specs: &[(i32, i32)]) -> Vec<DiningTable> {
        let mut out = Vec::new();
        for &(table_number, capacity) in specs {
            out.push(
                create(pool, DiningTableCreate { table_number, capacity })
                    .await
                    .unwrap(),
            );
        }
        out
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let table = create(&pool, DiningTableCreate { table_number: 7, capacity: 4 })
            .await
            .unwrap();
        assert_eq!(table.table_number, 7);
        assert!(!table.is_occupied);

        let found = find_by_id(&pool, table.id).await.unwrap().unwrap();
        assert_eq!(found, table);
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_number() {
        let pool = test_pool().await;
        seed(&pool, &[(1, 2)]).await;
        let err = create(&pool, DiningTableCreate { table_number: 1, capacity: 8 })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_number() {
        let pool = test_pool().await;
        seed(&pool, &[(3, 2), (1, 8), (2, 4)]).await;
        let numbers: Vec<i32> = find_all(&pool)
            .await
            .unwrap()
            .iter()
            .map(|t| t.table_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_find_with_capacity_order() {
        let pool = test_pool().await;
        seed(&pool, &[(6, 8), (4, 4), (1, 2), (3, 4), (5, 6)]).await;
        let picked: Vec<(i32, i32)> = find_with_capacity(&pool, 4)
            .await
            .unwrap()
            .iter()
            .map(|t| (t.capacity, t.table_number))
            .collect();
        assert_eq!(picked, vec![(4, 3), (4, 4), (6, 5), (8, 6)]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let pool = test_pool().await;
        let t = seed(&pool, &[(1, 4)]).await.remove(0);

        let updated = update(
            &pool,
            t.id,
            DiningTableUpdate {
                is_occupied: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.is_occupied);
        assert_eq!(updated.capacity, 4);

        let updated = update(
            &pool,
            t.id,
            DiningTableUpdate {
                capacity: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.is_occupied);
        assert_eq!(updated.capacity, 6);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let pool = test_pool().await;
        let err = update(&pool, 42, DiningTableUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_occupy_if_free_is_guarded() {
        let pool = test_pool().await;
        let t = seed(&pool, &[(1, 4)]).await.remove(0);
        assert!(occupy_if_free(&pool, t.id).await.unwrap());
        assert!(!occupy_if_free(&pool, t.id).await.unwrap());
        assert!(!occupy_if_free(&pool, 999).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_occupancy() {
        let pool = test_pool().await;
        assert_eq!(count_occupancy(&pool).await.unwrap(), (0, 0));
        let tables = seed(&pool, &[(1, 2), (2, 4), (3, 6)]).await;
        occupy_if_free(&pool, tables[1].id).await.unwrap();
        assert_eq!(count_occupancy(&pool).await.unwrap(), (3, 1));
    }
}
