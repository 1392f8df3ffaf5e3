//! Key/value settings store.
//!
//! Values are stored as strings; semantic validation happens in the
//! consumers (the kiosk engine parses its four keys through
//! `KioskSettings`). Writes persist immediately.

use crate::errors::AppResult;
use crate::models::settings::{
    KEY_ATTEMPT_WINDOW_SECONDS, KEY_DEBOUNCE_SECONDS, KEY_LOCKOUT_MINUTES,
    KEY_MAX_ATTEMPTS_PER_WINDOW,
};
use crate::models::KioskSettings;
use rusqlite::{Connection, OptionalExtension, params};

/// Defaults seeded at install time. The four kiosk.* keys drive the
/// decision engine; the rest belong to reporting and maintenance.
const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    (KEY_DEBOUNCE_SECONDS, "30"),
    (KEY_ATTEMPT_WINDOW_SECONDS, "300"),
    (KEY_MAX_ATTEMPTS_PER_WINDOW, "5"),
    (KEY_LOCKOUT_MINUTES, "10"),
    ("pay_period", "weekly"),
    ("week_start", "Monday"),
    ("rounding_minutes", "0"),
    ("overtime_policy", "none"),
    ("backups.keep_days", "90"),
];

pub fn get_setting(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM settings WHERE key = ?1")?;
    let value = stmt.query_row([key], |row| row.get(0)).optional()?;
    Ok(value)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO settings(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )?;
    stmt.execute(params![key, value])?;
    Ok(())
}

/// All settings rows, ordered by key (for `punchpad config --list`).
pub fn list_settings(conn: &Connection) -> AppResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare_cached("SELECT key, value FROM settings ORDER BY key")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert defaults for any missing key. Existing values are never touched.
pub fn seed_default_settings(conn: &Connection) -> AppResult<()> {
    let mut stmt =
        conn.prepare_cached("INSERT OR IGNORE INTO settings(key, value) VALUES (?1, ?2)")?;
    for (key, value) in DEFAULT_SETTINGS {
        stmt.execute(params![key, value])?;
    }
    Ok(())
}

/// Load the typed kiosk settings. Reads the current rows on every call —
/// the engine must never cache these across submissions.
pub fn kiosk_settings(conn: &Connection) -> AppResult<KioskSettings> {
    let defaults = KioskSettings::default();
    Ok(KioskSettings {
        debounce_seconds: KioskSettings::parse_or(
            get_setting(conn, KEY_DEBOUNCE_SECONDS)?,
            defaults.debounce_seconds,
        ),
        attempt_window_seconds: KioskSettings::parse_or(
            get_setting(conn, KEY_ATTEMPT_WINDOW_SECONDS)?,
            defaults.attempt_window_seconds,
        ),
        max_attempts_per_window: KioskSettings::parse_or(
            get_setting(conn, KEY_MAX_ATTEMPTS_PER_WINDOW)?,
            defaults.max_attempts_per_window,
        ),
        lockout_minutes: KioskSettings::parse_or(
            get_setting(conn, KEY_LOCKOUT_MINUTES)?,
            defaults.lockout_minutes,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db, open_in_memory};

    #[test]
    fn seeded_defaults_and_upsert() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();

        assert_eq!(
            get_setting(&conn, KEY_DEBOUNCE_SECONDS).unwrap().as_deref(),
            Some("30")
        );

        set_setting(&conn, KEY_DEBOUNCE_SECONDS, "45").unwrap();
        assert_eq!(
            get_setting(&conn, KEY_DEBOUNCE_SECONDS).unwrap().as_deref(),
            Some("45")
        );

        // Re-seeding never clobbers an administrator's value.
        seed_default_settings(&conn).unwrap();
        assert_eq!(
            get_setting(&conn, KEY_DEBOUNCE_SECONDS).unwrap().as_deref(),
            Some("45")
        );
    }

    #[test]
    fn kiosk_settings_defaults_and_overrides() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let s = kiosk_settings(&conn).unwrap();
        assert_eq!(s, KioskSettings::default());

        set_setting(&conn, KEY_MAX_ATTEMPTS_PER_WINDOW, "3").unwrap();
        set_setting(&conn, KEY_LOCKOUT_MINUTES, "garbage").unwrap();
        let s = kiosk_settings(&conn).unwrap();
        assert_eq!(s.max_attempts_per_window, 3);
        // Unparsable value falls back to the default.
        assert_eq!(s.lockout_minutes, 10);
    }

    #[test]
    fn missing_key_returns_none() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();
        assert!(get_setting(&conn, "no.such.key").unwrap().is_none());
    }
}
