//! Input validation helpers
//!
//! Text limits match the column widths guests have always been held to.
//! SQLite TEXT has no built-in length enforcement, so they are checked here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: usize = 100;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Email addresses
pub const MAX_EMAIL_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate a strictly positive integer (party size, capacity, table number)
pub fn validate_positive(value: i32, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!("{field} must be positive")));
    }
    Ok(())
}

/// Name, phone, optional email and party size of a guest payload
pub fn validate_party(
    customer_name: &str,
    phone_number: &str,
    email: &Option<String>,
    party_size: i32,
) -> Result<(), AppError> {
    validate_required_text(customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_required_text(phone_number, "phone_number", MAX_PHONE_LEN)?;
    validate_optional_text(email, "email", MAX_EMAIL_LEN)?;
    validate_positive(party_size, "party_size")
}
