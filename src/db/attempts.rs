//! Append-only PIN attempt ledger.
//!
//! Every kiosk submission leaves exactly one row here; the lockout and
//! debounce windows are computed from these rows. Rows are never mutated
//! or deleted.

use crate::errors::AppResult;
use crate::models::{FailReason, PinAttempt};
use crate::utils::time::{format_utc, parse_utc};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_attempt_row(row: &Row) -> rusqlite::Result<PinAttempt> {
    let ts_str: String = row.get("ts")?;
    let ts = parse_utc(&ts_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let reason_str: Option<String> = row.get("reason")?;
    Ok(PinAttempt {
        id: row.get("id")?,
        ts,
        source: row.get("source")?,
        success: row.get::<_, i64>("success")? == 1,
        employee_id: row.get("employee_id")?,
        reason: reason_str.as_deref().and_then(FailReason::from_db_str),
    })
}

/// Append one attempt row. Storage failures surface to the caller.
pub fn record_attempt(
    conn: &Connection,
    ts: DateTime<Utc>,
    source: &str,
    success: bool,
    employee_id: Option<i64>,
    reason: Option<FailReason>,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO pin_attempts (ts, source, success, employee_id, reason)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![
        format_utc(ts),
        source,
        success as i64,
        employee_id,
        reason.map(|r| r.to_db_str())
    ])?;
    Ok(())
}

/// Failed attempts from `source` with ts >= since that count toward the
/// lockout threshold. Debounced duplicates are excluded: a legitimate
/// employee tapping twice is not a wrong PIN.
pub fn count_recent_failures(
    conn: &Connection,
    source: &str,
    since: DateTime<Utc>,
) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "SELECT COUNT(*) FROM pin_attempts
         WHERE source = ?1 AND success = 0 AND ts >= ?2
           AND IFNULL(reason, '') <> 'duplicate_debounced'",
    )?;
    let count = stmt.query_row(params![source, format_utc(since)], |row| row.get(0))?;
    Ok(count)
}

/// All attempts from `source` with ts >= since, success or not.
pub fn count_recent(conn: &Connection, source: &str, since: DateTime<Utc>) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "SELECT COUNT(*) FROM pin_attempts WHERE source = ?1 AND ts >= ?2",
    )?;
    let count = stmt.query_row(params![source, format_utc(since)], |row| row.get(0))?;
    Ok(count)
}

/// Most recent counting failure from `source` with ts >= since; its
/// timestamp anchors the lockout expiry.
pub fn last_failure(
    conn: &Connection,
    source: &str,
    since: DateTime<Utc>,
) -> AppResult<Option<PinAttempt>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM pin_attempts
         WHERE source = ?1 AND success = 0 AND ts >= ?2
           AND IFNULL(reason, '') <> 'duplicate_debounced'
         ORDER BY ts DESC, id DESC
         LIMIT 1",
    )?;
    let attempt = stmt
        .query_row(params![source, format_utc(since)], map_attempt_row)
        .optional()?;
    Ok(attempt)
}

/// Most recent successful attempt from `source`, regardless of employee.
/// Debounce is scoped to the physical terminal: two taps at the same
/// kiosk must not register twice.
pub fn last_successful(conn: &Connection, source: &str) -> AppResult<Option<PinAttempt>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM pin_attempts
         WHERE source = ?1 AND success = 1
         ORDER BY ts DESC, id DESC
         LIMIT 1",
    )?;
    let attempt = stmt.query_row([source], map_attempt_row).optional()?;
    Ok(attempt)
}

/// Recent attempts for the audit CLI, newest first.
pub fn list_attempts(conn: &Connection, source: &str, limit: i64) -> AppResult<Vec<PinAttempt>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM pin_attempts
         WHERE source = ?1
         ORDER BY ts DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![source, limit], map_attempt_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Total number of attempt rows, across all sources.
pub fn count_all(conn: &Connection) -> AppResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM pin_attempts", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db, open_in_memory};
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(secs)
    }

    #[test]
    fn failure_window_excludes_debounced_and_other_sources() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();

        record_attempt(&conn, t(0), "kioskA", false, None, Some(FailReason::NoMatch)).unwrap();
        record_attempt(&conn, t(1), "kioskA", false, Some(1), Some(FailReason::DuplicateDebounced))
            .unwrap();
        record_attempt(&conn, t(2), "kioskA", true, Some(1), None).unwrap();
        record_attempt(&conn, t(3), "kioskB", false, None, Some(FailReason::NoMatch)).unwrap();

        assert_eq!(count_recent_failures(&conn, "kioskA", t(0)).unwrap(), 1);
        assert_eq!(count_recent(&conn, "kioskA", t(0)).unwrap(), 3);
        assert_eq!(count_recent_failures(&conn, "kioskB", t(0)).unwrap(), 1);
    }

    #[test]
    fn window_lower_bound_is_inclusive() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();

        record_attempt(&conn, t(0), "kioskA", false, None, Some(FailReason::NoMatch)).unwrap();
        assert_eq!(count_recent_failures(&conn, "kioskA", t(0)).unwrap(), 1);
        assert_eq!(count_recent_failures(&conn, "kioskA", t(1)).unwrap(), 0);
    }

    #[test]
    fn last_successful_ignores_employee() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();

        record_attempt(&conn, t(0), "kioskA", true, Some(1), None).unwrap();
        record_attempt(&conn, t(5), "kioskA", true, Some(2), None).unwrap();

        let last = last_successful(&conn, "kioskA").unwrap().unwrap();
        assert_eq!(last.ts, t(5));
        assert_eq!(last.employee_id, Some(2));
        assert!(last_successful(&conn, "kioskB").unwrap().is_none());
    }

    #[test]
    fn last_failure_skips_debounced_rows() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();

        record_attempt(&conn, t(0), "kioskA", false, None, Some(FailReason::NoMatch)).unwrap();
        record_attempt(&conn, t(9), "kioskA", false, Some(1), Some(FailReason::DuplicateDebounced))
            .unwrap();

        let last = last_failure(&conn, "kioskA", t(0)).unwrap().unwrap();
        assert_eq!(last.ts, t(0));
        assert_eq!(last.reason, Some(FailReason::NoMatch));
    }
}
