//! Punch ledger: clock-in/clock-out pairs.
//!
//! "At most one open punch per employee" is a cross-row constraint the
//! schema cannot express; the kiosk engine enforces it with a
//! check-then-act inside its transaction, and the writers here double-check
//! defensively before touching a row.

use crate::errors::{AppError, AppResult};
use crate::models::{PunchMethod, PunchRecord};
use crate::utils::time::{format_utc, parse_utc};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_punch_row(row: &Row) -> rusqlite::Result<PunchRecord> {
    let conv = |e: AppError| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    };
    let clock_in_str: String = row.get("clock_in")?;
    let clock_out_str: Option<String> = row.get("clock_out")?;
    let method_str: String = row.get("method")?;
    let clock_out = match clock_out_str {
        Some(s) => Some(parse_utc(&s).map_err(conv)?),
        None => None,
    };
    let method = PunchMethod::from_db_str(&method_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid punch method: {}", method_str))),
        )
    })?;
    Ok(PunchRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        clock_in: parse_utc(&clock_in_str).map_err(conv)?,
        clock_out,
        method,
        note: row.get("note")?,
    })
}

pub fn get_punch(conn: &Connection, id: i64) -> AppResult<Option<PunchRecord>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM punches WHERE id = ?1")?;
    let punch = stmt.query_row([id], map_punch_row).optional()?;
    Ok(punch)
}

/// The single open punch for the employee, if any.
pub fn open_punch_for(conn: &Connection, employee_id: i64) -> AppResult<Option<PunchRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM punches WHERE employee_id = ?1 AND clock_out IS NULL",
    )?;
    let punch = stmt.query_row([employee_id], map_punch_row).optional()?;
    Ok(punch)
}

/// Create a new open punch. Fails with AlreadyOpen if one exists; the
/// engine checks first and this is the defensive double-check.
pub fn clock_in(
    conn: &Connection,
    employee_id: i64,
    ts: DateTime<Utc>,
    method: PunchMethod,
    note: Option<&str>,
) -> AppResult<PunchRecord> {
    if open_punch_for(conn, employee_id)?.is_some() {
        return Err(AppError::AlreadyOpen(employee_id));
    }
    conn.execute(
        "INSERT INTO punches (employee_id, clock_in, clock_out, method, note)
         VALUES (?1, ?2, NULL, ?3, ?4)",
        params![employee_id, format_utc(ts), method.to_db_str(), note],
    )?;
    let id = conn.last_insert_rowid();
    get_punch(conn, id)?.ok_or(AppError::PunchNotFound(id))
}

/// Close an open punch by setting its clock-out. The only mutation the
/// ledger ever performs.
pub fn clock_out(conn: &Connection, punch_id: i64, ts: DateTime<Utc>) -> AppResult<PunchRecord> {
    let punch = get_punch(conn, punch_id)?.ok_or(AppError::PunchNotFound(punch_id))?;
    if punch.clock_out.is_some() {
        return Err(AppError::AlreadyClosed(punch_id));
    }
    if ts < punch.clock_in {
        return Err(AppError::InvalidOrder(punch_id));
    }
    conn.execute(
        "UPDATE punches SET clock_out = ?1 WHERE id = ?2",
        params![format_utc(ts), punch_id],
    )?;
    get_punch(conn, punch_id)?.ok_or(AppError::PunchNotFound(punch_id))
}

/// Closed punches overlapping [start, end), ordered by clock-in.
/// Start bound is inclusive, end bound is exclusive.
pub fn punches_for(
    conn: &Connection,
    employee_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<PunchRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM punches
         WHERE employee_id = ?1
           AND clock_in < ?2
           AND clock_out IS NOT NULL
           AND clock_out > ?3
         ORDER BY clock_in ASC",
    )?;
    let rows = stmt.query_map(
        params![employee_id, format_utc(end), format_utc(start)],
        map_punch_row,
    )?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of open punches for the employee (0 or 1 when the engine
/// invariant holds; exposed for tests and integrity checks).
pub fn count_open_for(conn: &Connection, employee_id: i64) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "SELECT COUNT(*) FROM punches WHERE employee_id = ?1 AND clock_out IS NULL",
    )?;
    let count = stmt.query_row([employee_id], |row| row.get(0))?;
    Ok(count)
}

/// Closed worked intervals clamped to [start, end).
pub fn worked_intervals(
    conn: &Connection,
    employee_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    let mut intervals = Vec::new();
    for punch in punches_for(conn, employee_id, start, end)? {
        let out = match punch.clock_out {
            Some(out) => out,
            None => continue,
        };
        let lo = punch.clock_in.max(start);
        let hi = out.min(end);
        if hi > lo {
            intervals.push((lo, hi));
        }
    }
    Ok(intervals)
}

/// Total worked seconds within [start, end).
pub fn total_seconds_worked(
    conn: &Connection,
    employee_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<i64> {
    let mut total = 0;
    for (lo, hi) in worked_intervals(conn, employee_id, start, end)? {
        total += (hi - lo).num_seconds();
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::employees::add_employee;
    use crate::db::{init_db, open_in_memory};
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap() + chrono::Duration::seconds(secs)
    }

    fn setup() -> (Connection, i64) {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let emp = add_employee(&conn, "Alice", 18.5, "1234").unwrap();
        (conn, emp.id)
    }

    #[test]
    fn clock_in_then_out() {
        let (conn, emp) = setup();

        let punch = clock_in(&conn, emp, t(0), PunchMethod::Kiosk, None).unwrap();
        assert!(punch.is_open());
        assert_eq!(open_punch_for(&conn, emp).unwrap().unwrap().id, punch.id);

        let closed = clock_out(&conn, punch.id, t(3600)).unwrap();
        assert_eq!(closed.duration_seconds(), 3600);
        assert!(open_punch_for(&conn, emp).unwrap().is_none());
    }

    #[test]
    fn double_clock_in_is_rejected() {
        let (conn, emp) = setup();
        clock_in(&conn, emp, t(0), PunchMethod::Kiosk, None).unwrap();
        assert!(matches!(
            clock_in(&conn, emp, t(10), PunchMethod::Kiosk, None),
            Err(AppError::AlreadyOpen(_))
        ));
    }

    #[test]
    fn closing_twice_or_backwards_is_rejected() {
        let (conn, emp) = setup();
        let punch = clock_in(&conn, emp, t(100), PunchMethod::Kiosk, None).unwrap();

        assert!(matches!(
            clock_out(&conn, punch.id, t(50)),
            Err(AppError::InvalidOrder(_))
        ));

        clock_out(&conn, punch.id, t(200)).unwrap();
        assert!(matches!(
            clock_out(&conn, punch.id, t(300)),
            Err(AppError::AlreadyClosed(_))
        ));
    }

    #[test]
    fn zero_length_punch_is_allowed() {
        let (conn, emp) = setup();
        let punch = clock_in(&conn, emp, t(0), PunchMethod::Kiosk, None).unwrap();
        let closed = clock_out(&conn, punch.id, t(0)).unwrap();
        assert_eq!(closed.duration_seconds(), 0);
    }

    #[test]
    fn range_read_returns_closed_punches_only() {
        let (conn, emp) = setup();

        let p1 = clock_in(&conn, emp, t(0), PunchMethod::Kiosk, None).unwrap();
        clock_out(&conn, p1.id, t(3600)).unwrap();
        // Second punch stays open; reports must not see it.
        clock_in(&conn, emp, t(7200), PunchMethod::Kiosk, None).unwrap();

        let rows = punches_for(&conn, emp, t(0), t(100_000)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, p1.id);
    }

    #[test]
    fn intervals_are_clamped_to_range() {
        let (conn, emp) = setup();
        let p = clock_in(&conn, emp, t(0), PunchMethod::Kiosk, None).unwrap();
        clock_out(&conn, p.id, t(10_000)).unwrap();

        // Query a window strictly inside the punch.
        let secs = total_seconds_worked(&conn, emp, t(1_000), t(4_000)).unwrap();
        assert_eq!(secs, 3_000);
    }
}
