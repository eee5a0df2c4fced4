//! 时间工具函数
//!
//! 所有字符串→时间戳转换统一在 service 层完成，
//! repository 与 allocation 层只接收 `i64` Unix millis。

use shared::util::parse_datetime_millis;

use super::{AppError, AppResult, ErrorCode};

/// Parse a reservation time
///
/// RFC 3339 (`...Z` or explicit offset), or `YYYY-MM-DDTHH:MM[:SS]` without
/// an offset, taken as UTC.
pub fn parse_reservation_time(value: &str) -> AppResult<i64> {
    parse_datetime_millis(value).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid reservation_time: {value}"),
        )
        .with_detail("field", "reservation_time")
    })
}

/// Reject times strictly before `now`
pub fn validate_not_past(at: i64, now: i64) -> AppResult<()> {
    if at < now {
        return Err(AppError::new(ErrorCode::ReservationTimeInPast));
    }
    Ok(())
}
