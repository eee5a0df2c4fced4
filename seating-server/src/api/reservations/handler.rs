//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{Reservation, ReservationCreate, ReservationUpdate};

use crate::api::json::ApiJson;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/reservations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.seating.list_reservations().await?;
    Ok(Json(reservations))
}

/// POST /api/reservations - 创建预订
///
/// 有合适桌台时直接返回 confirmed，否则保持 pending
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.seating.create_reservation(payload).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// PUT /api/reservations/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .seating
        .update_reservation_status(id, payload.status)
        .await?;
    Ok(Json(reservation))
}
