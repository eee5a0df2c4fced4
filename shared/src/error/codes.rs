//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Reservation errors
//! - 5xxx: Waitlist errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Reservation is not confirmed
    ReservationNotConfirmed = 4002,
    /// Reservation already has a table assigned
    ReservationAlreadyAssigned = 4003,
    /// Reservation is not pending
    ReservationNotPending = 4004,
    /// Reservation time is in the past
    ReservationTimeInPast = 4005,
    /// Reservation has no table assigned
    ReservationHasNoTable = 4006,

    // ==================== 5xxx: Waitlist ====================
    /// Waitlist entry not found
    WaitlistEntryNotFound = 5001,
    /// Waitlist entry is not in a status that allows the operation
    WaitlistInvalidStatus = 5002,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already exists
    TableNumberExists = 7003,
    /// No table can serve the party
    NoTableAvailable = 7004,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Concurrent allocation kept invalidating the decision
    AllocationConflict = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationNotConfirmed => "Reservation is not confirmed",
            ErrorCode::ReservationAlreadyAssigned => "Reservation already has a table assigned",
            ErrorCode::ReservationNotPending => "Reservation is not pending",
            ErrorCode::ReservationTimeInPast => "Reservation time is in the past",
            ErrorCode::ReservationHasNoTable => "Reservation has no table assigned",

            // Waitlist
            ErrorCode::WaitlistEntryNotFound => "Waitlist entry not found",
            ErrorCode::WaitlistInvalidStatus => "Waitlist entry status does not allow this operation",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table number already exists",
            ErrorCode::NoTableAvailable => "No suitable table available",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::AllocationConflict => "Table allocation conflicted with a concurrent request",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::ReservationNotConfirmed),
            4003 => Ok(ErrorCode::ReservationAlreadyAssigned),
            4004 => Ok(ErrorCode::ReservationNotPending),
            4005 => Ok(ErrorCode::ReservationTimeInPast),
            4006 => Ok(ErrorCode::ReservationHasNoTable),

            // Waitlist
            5001 => Ok(ErrorCode::WaitlistEntryNotFound),
            5002 => Ok(ErrorCode::WaitlistInvalidStatus),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7003 => Ok(ErrorCode::TableNumberExists),
            7004 => Ok(ErrorCode::NoTableAvailable),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9006 => Ok(ErrorCode::AllocationConflict),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
