//! 错误转换
//!
//! Maps server-internal errors onto [`AppError`] so handlers can use `?`.
//!
//! | Source | ErrorCode | HTTP |
//! |--------|-----------|------|
//! | `Rejection` (not found) | `ReservationNotFound` / `WaitlistEntryNotFound` | 404 |
//! | `Rejection` (invalid state) | `ReservationNotConfirmed`, `WaitlistInvalidStatus`, ... | 409 |
//! | `Rejection` (no table) | `NoTableAvailable` | 422 |
//! | `EngineError::ConflictRetriesExhausted` | `AllocationConflict` | 503 |
//! | `EngineError::Store`, `RepoError::Database` | `DatabaseError` | 500 |
//! | `JsonRejection` (missing field) | `RequiredField` | 400 |
//! | `JsonRejection` (wrong type / bad syntax) | `ValidationFailed` / `InvalidFormat` | 400 |
//! | `JsonRejection` (no JSON content type) | `InvalidRequest` | 400 |

use shared::error::{AppError, ErrorCode};

use crate::allocation::{EngineError, Rejection};
use crate::db::repository::RepoError;

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError::with_message(rejection.code, rejection.reason)
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Store(e) => AppError::database(e.to_string()),
            EngineError::ConflictRetriesExhausted { operation, attempts } => {
                AppError::with_message(
                    ErrorCode::AllocationConflict,
                    "Tables changed too quickly, please try again",
                )
                .with_detail("operation", operation)
                .with_detail("attempts", attempts)
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}
