//! JSON 请求体提取器
//!
//! `axum::Json` 解析失败时返回纯文本 422；这里统一转成 [`AppError`] 信封 (400)。

use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;

use crate::utils::AppError;

/// `axum::Json` whose rejection is an [`AppError`]
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
