//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

use crate::api::json::ApiJson;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/tables - 获取所有桌台 (按桌号排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.seating.list_tables().await?;
    Ok(Json(tables))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    let table = state.seating.create_table(payload).await?;
    tracing::info!(table_number = table.table_number, capacity = table.capacity, "Table created");
    Ok((StatusCode::CREATED, Json(table)))
}

/// PUT /api/tables/{id} - 更新容量或占用状态
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table = state.seating.update_table(id, payload).await?;
    Ok(Json(table))
}
