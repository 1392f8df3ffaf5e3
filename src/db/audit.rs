//! Append-only audit log.
//!
//! Administrative operations and punch side effects land here so an
//! administrator can reconstruct who did what, and when.

use crate::errors::AppResult;
use crate::utils::time::{format_utc, utc_now};
use rusqlite::{Connection, params};

pub fn append_audit(
    conn: &Connection,
    actor: &str,
    action: &str,
    target_type: &str,
    target_id: Option<i64>,
    meta: Option<serde_json::Value>,
) -> AppResult<()> {
    let meta_json = meta.map(|m| m.to_string());
    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_log (actor, action, target_type, target_id, meta_json, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        actor,
        action,
        target_type,
        target_id,
        meta_json,
        format_utc(utc_now())
    ])?;
    Ok(())
}

/// Most recent audit rows, newest first, formatted for terminal output.
pub fn list_audit(conn: &Connection, limit: i64) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT created_at, actor, action, target_type, target_id, meta_json
         FROM audit_log
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit], |row| {
        let created_at: String = row.get(0)?;
        let actor: String = row.get(1)?;
        let action: String = row.get(2)?;
        let target_type: String = row.get(3)?;
        let target_id: Option<i64> = row.get(4)?;
        let meta_json: Option<String> = row.get(5)?;
        Ok(format!(
            "{} {} {} {}{} {}",
            created_at,
            actor,
            action,
            target_type,
            target_id.map(|id| format!("#{}", id)).unwrap_or_default(),
            meta_json.unwrap_or_default()
        ))
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
