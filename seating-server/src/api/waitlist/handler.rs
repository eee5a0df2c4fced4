//! Waitlist API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{WaitlistCreate, WaitlistEntry, WaitlistJoined, WaitlistUpdate};

use crate::api::json::ApiJson;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/waitlist - 当前等待中的客人 (先到先得)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WaitlistEntry>>> {
    let entries = state.seating.list_waitlist().await?;
    Ok(Json(entries))
}

/// POST /api/waitlist - 加入候位，有空桌时立即入座
pub async fn join(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<WaitlistCreate>,
) -> AppResult<(StatusCode, Json<WaitlistJoined>)> {
    let joined = state.seating.join_waitlist(payload).await?;
    Ok((StatusCode::CREATED, Json(joined)))
}

/// PUT /api/waitlist/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<WaitlistUpdate>,
) -> AppResult<Json<WaitlistEntry>> {
    let entry = state
        .seating
        .update_waitlist_status(id, payload.status)
        .await?;
    Ok(Json(entry))
}
