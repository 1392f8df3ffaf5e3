//! Time utilities: UTC timestamp formatting/parsing and day bounds.
//!
//! Every persisted timestamp is an ISO-8601 UTC string with a `Z` suffix and
//! seconds precision ("2025-06-01T09:00:00Z"). String ordering therefore
//! matches chronological ordering, which the window queries rely on.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC instant as the canonical DB string.
pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.format(TS_FORMAT).to_string()
}

/// Parse a canonical DB string back into a UTC instant.
pub fn parse_utc(s: &str) -> AppResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TS_FORMAT)
        .map(|ndt| Utc.from_utc_datetime(&ndt))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Current instant truncated to seconds precision.
pub fn utc_now() -> DateTime<Utc> {
    let now = Utc::now();
    now - chrono::Duration::nanoseconds(now.timestamp_subsec_nanos() as i64)
}

/// Parse a calendar day ("YYYY-MM-DD").
pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// UTC midnight at the start of the given day.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).expect("midnight is valid"))
}

/// UTC midnight at the start of the following day (exclusive bound).
pub fn day_end(day: NaiveDate) -> DateTime<Utc> {
    day_start(day + chrono::Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_and_parse_round_trip() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 15).unwrap();
        let s = format_utc(ts);
        assert_eq!(s, "2025-06-01T09:30:15Z");
        assert_eq!(parse_utc(&s).unwrap(), ts);
    }

    #[test]
    fn string_order_matches_time_order() {
        let a = Utc.with_ymd_and_hms(2025, 6, 1, 9, 59, 59).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        assert!(format_utc(a) < format_utc(b));
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_utc("yesterday").is_err());
        assert!(parse_day("2025-13-01").is_err());
    }

    #[test]
    fn day_bounds_cover_24h() {
        let day = parse_day("2025-06-01").unwrap();
        let secs = (day_end(day) - day_start(day)).num_seconds();
        assert_eq!(secs, 86_400);
    }
}
