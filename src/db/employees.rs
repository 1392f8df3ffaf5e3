//! Employee registry.
//!
//! The registry is the sole writer of `employees` rows; the kiosk engine
//! only ever reads them. PINs are hashed before they reach this module's
//! SQL and the plain text is never stored or logged.

use crate::core::security::make_pin_hash;
use crate::db::audit::append_audit;
use crate::errors::{AppError, AppResult};
use crate::models::Employee;
use crate::utils::time::{format_utc, parse_utc, utc_now};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde_json::json;

pub(crate) fn map_employee_row(row: &Row) -> rusqlite::Result<Employee> {
    let created_at_str: String = row.get("created_at")?;
    let created_at = parse_utc(&created_at_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        pin_hash: row.get("pin_hash")?,
        pay_rate: row.get("pay_rate")?,
        active: row.get::<_, i64>("active")? == 1,
        created_at,
    })
}

/// Hash the PIN, insert the employee, and audit the addition.
pub fn add_employee(conn: &Connection, name: &str, pay_rate: f64, pin: &str) -> AppResult<Employee> {
    let pin_hash = make_pin_hash(pin)?;
    let now = format_utc(utc_now());
    conn.execute(
        "INSERT INTO employees (name, pin_hash, pay_rate, active, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![name, pin_hash, pay_rate, now],
    )?;
    let id = conn.last_insert_rowid();
    append_audit(
        conn,
        "manager",
        "employee.add",
        "employee",
        Some(id),
        Some(json!({ "name": name })),
    )?;
    get_employee(conn, id)?.ok_or(AppError::EmployeeNotFound(id))
}

/// Flip the active flag off. The row stays for reporting and audit history.
pub fn disable_employee(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("UPDATE employees SET active = 0 WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::EmployeeNotFound(id));
    }
    append_audit(conn, "manager", "employee.disable", "employee", Some(id), None)?;
    Ok(())
}

/// Replace the stored PIN hash with a freshly salted one.
pub fn reset_employee_pin(conn: &Connection, id: i64, pin: &str) -> AppResult<()> {
    let pin_hash = make_pin_hash(pin)?;
    let changed = conn.execute(
        "UPDATE employees SET pin_hash = ?1 WHERE id = ?2",
        params![pin_hash, id],
    )?;
    if changed == 0 {
        return Err(AppError::EmployeeNotFound(id));
    }
    append_audit(conn, "manager", "employee.reset_pin", "employee", Some(id), None)?;
    Ok(())
}

pub fn get_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM employees WHERE id = ?1")?;
    let emp = stmt.query_row([id], map_employee_row).optional()?;
    Ok(emp)
}

pub fn list_employees(conn: &Connection, active_only: bool) -> AppResult<Vec<Employee>> {
    let sql = if active_only {
        "SELECT * FROM employees WHERE active = 1 ORDER BY id"
    } else {
        "SELECT * FROM employees ORDER BY id"
    };
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map([], map_employee_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
