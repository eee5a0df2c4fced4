use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Milliseconds in one minute
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a minute count into milliseconds
pub const fn minutes_to_millis(minutes: i64) -> i64 {
    minutes * MILLIS_PER_MINUTE
}

/// Parse an RFC 3339 timestamp into Unix millis.
///
/// Accepts both `2026-05-01T19:00:00Z` and explicit offsets.
pub fn parse_rfc3339_millis(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Offset-less ISO 8601 forms, read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse an ISO 8601 timestamp into Unix millis.
///
/// RFC 3339 with `Z` or an offset first, then the offset-less
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` form an HTML `datetime-local` input posts,
/// interpreted as UTC.
pub fn parse_datetime_millis(value: &str) -> Option<i64> {
    let value = value.trim();
    parse_rfc3339_millis(value).or_else(|| {
        NAIVE_FORMATS.iter().find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt)
                .ok()
                .map(|dt| dt.and_utc().timestamp_millis())
        })
    })
}

/// Format Unix millis as RFC 3339 (UTC)
pub fn millis_to_rfc3339(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

/// `[start, end)` of the UTC day containing `millis`
pub fn utc_day_bounds(millis: i64) -> (i64, i64) {
    let day = Utc
        .timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
        .date_naive();
    let start = day.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    (start, start + minutes_to_millis(24 * 60))
}
