//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ReservationNotFound
            | Self::WaitlistEntryNotFound
            | Self::TableNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (duplicates and invalid state transitions)
            Self::AlreadyExists
            | Self::TableNumberExists
            | Self::ReservationNotConfirmed
            | Self::ReservationAlreadyAssigned
            | Self::ReservationNotPending
            | Self::ReservationHasNoTable
            | Self::WaitlistInvalidStatus => StatusCode::CONFLICT,

            // 422 Unprocessable: request is valid but nothing can serve it
            Self::NoTableAvailable => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::AllocationConflict => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
