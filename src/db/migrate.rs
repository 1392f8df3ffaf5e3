//! Versioned schema migrations.
//!
//! Every migration is additive (new tables, columns, indexes — never
//! destructive) and recorded in `schema_migrations`, so an old database is
//! always safe to open with a newer binary.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Ordered list of (version, SQL script). Append only; never edit a
/// version that has shipped.
const MIGRATIONS: &[(i64, &str)] = &[
    (
        1,
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            pin_hash   TEXT NOT NULL,
            pay_rate   REAL NOT NULL DEFAULT 0,
            active     INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS punches (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            clock_in    TEXT NOT NULL,
            clock_out   TEXT,
            method      TEXT NOT NULL DEFAULT 'kiosk' CHECK(method IN ('kiosk','manual')),
            note        TEXT
        );

        CREATE TABLE IF NOT EXISTS pin_attempts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            ts          TEXT NOT NULL,
            source      TEXT NOT NULL,
            success     INTEGER NOT NULL,
            employee_id INTEGER,
            reason      TEXT
        );

        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS absences (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            day         TEXT NOT NULL,
            reason      TEXT NOT NULL,
            UNIQUE(employee_id, day)
        );

        CREATE TABLE IF NOT EXISTS audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            actor       TEXT NOT NULL,
            action      TEXT NOT NULL,
            target_type TEXT NOT NULL,
            target_id   INTEGER,
            meta_json   TEXT,
            created_at  TEXT NOT NULL
        );
        "#,
    ),
    (
        2,
        r#"
        CREATE INDEX IF NOT EXISTS idx_pin_attempts_source_ts ON pin_attempts(source, ts);
        CREATE INDEX IF NOT EXISTS idx_punches_employee_open ON punches(employee_id, clock_out);
        CREATE INDEX IF NOT EXISTS idx_punches_employee_in ON punches(employee_id, clock_in);
        "#,
    ),
];

fn ensure_schema_migrations_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY
        );",
    )?;
    Ok(())
}

fn applied_versions(conn: &Connection) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Each migration executes together with its version bookkeeping inside a
/// single transaction, so a failure leaves the schema at the previous
/// version. Returns the versions applied in this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<i64>> {
    ensure_schema_migrations_table(conn)?;

    let applied = applied_versions(conn)?;
    let mut applied_now = Vec::new();

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        let script = format!(
            "BEGIN;\n{}\nINSERT INTO schema_migrations(version) VALUES ({});\nCOMMIT;",
            sql, version
        );
        conn.execute_batch(&script)
            .map_err(|e| AppError::Migration(format!("migration {} failed: {}", version, e)))?;
        applied_now.push(*version);
    }

    Ok(applied_now)
}
