//! Allocation outcomes
//!
//! Expected negative results (missing entity, wrong status, no fitting table)
//! are [`Rejection`] values. Only storage failures and exhausted commit
//! retries are [`EngineError`]s.

use shared::error::ErrorCode;
use shared::models::DiningTable;
use thiserror::Error;

use super::store::StoreError;

/// A committed allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub table: DiningTable,
    pub message: String,
}

impl Allocation {
    pub(crate) fn reservation(table: DiningTable) -> Self {
        let message = format!("Table {} assigned to reservation", table.table_number);
        Self { table, message }
    }

    pub(crate) fn seating(table: DiningTable) -> Self {
        let message = format!("Party seated at table {}", table.table_number);
        Self { table, message }
    }
}

/// Why an operation declined to allocate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    NotFound,
    InvalidState,
    NoTableAvailable,
}

/// Failure outcome of an engine operation, nothing was mutated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Rejection {
    pub kind: RejectionKind,
    pub code: ErrorCode,
    pub reason: String,
}

impl Rejection {
    pub fn not_found(code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            kind: RejectionKind::NotFound,
            code,
            reason: reason.into(),
        }
    }

    pub fn invalid_state(code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            kind: RejectionKind::InvalidState,
            code,
            reason: reason.into(),
        }
    }

    pub fn no_table(reason: impl Into<String>) -> Self {
        Self {
            kind: RejectionKind::NoTableAvailable,
            code: ErrorCode::NoTableAvailable,
            reason: reason.into(),
        }
    }
}

/// Infrastructure failure of the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{operation} gave up after {attempts} conflicting commits")]
    ConflictRetriesExhausted {
        operation: &'static str,
        attempts: u32,
    },
}

/// Success or rejection
pub type AllocationOutcome = Result<Allocation, Rejection>;

pub type EngineResult<T> = Result<T, EngineError>;
