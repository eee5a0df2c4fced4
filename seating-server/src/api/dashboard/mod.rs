//! Dashboard API - 当日预订数、候位数与桌台占用

use axum::{Json, Router, extract::State, routing::get};
use shared::models::DashboardSummary;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(summary))
}

/// GET /api/dashboard
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<DashboardSummary>> {
    let summary = state.seating.dashboard().await?;
    Ok(Json(summary))
}
