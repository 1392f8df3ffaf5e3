//! Absence records. Reporting-only data: the kiosk engine never reads
//! these rows.

use crate::errors::{AppError, AppResult};
use crate::models::AbsenceRecord;
use crate::utils::time::parse_day;
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

fn map_absence_row(row: &Row) -> rusqlite::Result<AbsenceRecord> {
    let day_str: String = row.get("day")?;
    let day = parse_day(&day_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(AbsenceRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        day,
        reason: row.get("reason")?,
    })
}

/// One absence per employee per day; a second insert for the same day
/// updates the reason instead of duplicating the row.
pub fn add_absence(
    conn: &Connection,
    employee_id: i64,
    day: NaiveDate,
    reason: &str,
) -> AppResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM employees WHERE id = ?1",
        [employee_id],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(AppError::EmployeeNotFound(employee_id));
    }
    conn.execute(
        "INSERT INTO absences (employee_id, day, reason) VALUES (?1, ?2, ?3)
         ON CONFLICT(employee_id, day) DO UPDATE SET reason = excluded.reason",
        params![employee_id, day.format("%Y-%m-%d").to_string(), reason],
    )?;
    Ok(())
}

pub fn list_absences(conn: &Connection, employee_id: i64) -> AppResult<Vec<AbsenceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM absences WHERE employee_id = ?1 ORDER BY day ASC",
    )?;
    let rows = stmt.query_map([employee_id], map_absence_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
