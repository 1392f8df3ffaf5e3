//! SQLite storage layer.
//!
//! One shared database holds every durable table (employees, punches,
//! pin_attempts, settings, absences, audit_log). All access goes through an
//! explicit `Connection` handle passed in by the caller; tests open
//! in-memory databases the same way.

pub mod absences;
pub mod attempts;
pub mod audit;
pub mod employees;
pub mod migrate;
pub mod punches;
pub mod settings;

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

/// Open the database and apply the connection profile: WAL journaling,
/// full synchronous writes, foreign keys, and a 5s busy timeout so two
/// kiosk processes sharing the file serialize instead of failing.
pub fn open_db<P: AsRef<Path>>(path: P) -> AppResult<Connection> {
    let conn = Connection::open(path)?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

/// Same profile for in-memory databases (unit tests).
pub fn open_in_memory() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

fn apply_pragmas(conn: &Connection) -> AppResult<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "FULL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;
    Ok(())
}

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine and
/// seeds default settings afterwards.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    migrate::run_pending_migrations(conn)?;
    settings::seed_default_settings(conn)?;
    Ok(())
}
