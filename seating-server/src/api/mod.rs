//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 桌台管理接口
//! - [`reservations`] - 预订接口
//! - [`waitlist`] - 候位接口
//! - [`dashboard`] - 当日概览接口
//! - [`json`] - 请求体提取器 (错误走统一信封)
//!
//! 成功响应直接返回 JSON 实体，错误统一走 [`AppError`](crate::utils::AppError)
//! 的 `ApiResponse` 信封。

pub mod dashboard;
pub mod health;
pub mod json;
pub mod reservations;
pub mod tables;
pub mod waitlist;

use std::time::Duration;

use axum::Router;
use http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// 合并所有业务路由 (未绑定状态)
pub fn build_app() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(reservations::router())
        .merge(waitlist::router())
        .merge(dashboard::router())
}

/// 构建完整的 HTTP 应用 (路由 + 中间件 + 状态)
pub fn build_router(state: ServerState) -> Router {
    let timeout = timeout_layer(state.config.request_timeout_ms);

    build_app()
        .layer(timeout)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 超时返回 408
fn timeout_layer(timeout_ms: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_millis(timeout_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let app: Router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(timeout_layer(50));

        let slow = Request::builder().uri("/slow").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(slow).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let fast = Request::builder().uri("/fast").body(Body::empty()).unwrap();
        let response = app.oneshot(fast).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
