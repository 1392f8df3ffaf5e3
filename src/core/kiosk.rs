//! Kiosk decision engine.
//!
//! One PIN submission enters `submit`, one `Decision` comes out, and
//! exactly one pin_attempts row is written, all inside a single immediate
//! transaction. Two simultaneous submissions at the same kiosk therefore
//! serialize: they can never both see "no open punch" and both clock in.
//!
//! Timestamps are supplied by the caller, never read from the wall clock,
//! so the engine is deterministic and every window is testable.

use crate::core::security::{is_valid_pin, resolve_pin};
use crate::db::{attempts, audit, punches, settings};
use crate::errors::AppResult;
use crate::models::{Decision, FailReason, PunchMethod};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, TransactionBehavior};
use serde_json::json;

/// The engine owns no state of its own; it wraps an explicit connection
/// handle so tests can hand it an in-memory database.
pub struct KioskEngine<'a> {
    conn: &'a mut Connection,
}

impl<'a> KioskEngine<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Self { conn }
    }

    /// Evaluate one PIN submission from `source` at `ts`. A `note`, when
    /// given, is attached to the punch a clock-in creates; clock-outs and
    /// rejected submissions ignore it.
    ///
    /// Check order is strict and short-circuiting: lockout, PIN
    /// resolution, debounce, punch direction. Every branch records the
    /// attempt before returning; storage failures roll the whole
    /// transaction back, attempt row included.
    pub fn submit(
        &mut self,
        pin: &str,
        source: &str,
        ts: DateTime<Utc>,
        note: Option<&str>,
    ) -> AppResult<Decision> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Settings are re-read on every submission so administrative
        // changes apply immediately.
        let cfg = settings::kiosk_settings(&tx)?;

        // 1. Lockout, keyed by source. One terminal's abuse never locks
        // out another terminal.
        let window_start = ts - Duration::seconds(cfg.attempt_window_seconds);
        let failures = attempts::count_recent_failures(&tx, source, window_start)?;
        if failures >= cfg.max_attempts_per_window {
            if let Some(last) = attempts::last_failure(&tx, source, window_start)? {
                let locked_until = last.ts + Duration::minutes(cfg.lockout_minutes);
                if ts < locked_until {
                    let retry_after_seconds = (locked_until - ts).num_seconds();
                    attempts::record_attempt(
                        &tx,
                        ts,
                        source,
                        false,
                        None,
                        Some(FailReason::LockedOut),
                    )?;
                    audit::append_audit(
                        &tx,
                        "system",
                        "auth.lockout",
                        "pin_attempt",
                        None,
                        Some(json!({ "source": source })),
                    )?;
                    tx.commit()?;
                    return Ok(Decision::LockedOut { retry_after_seconds });
                }
            }
        }

        // 2. Resolve the PIN among active employees. Malformed input is
        // rejected before any hash work; both cases count toward the
        // lockout threshold on later calls.
        let employee = if is_valid_pin(pin) {
            resolve_pin(&tx, pin)?
        } else {
            None
        };
        let employee = match employee {
            Some(emp) => emp,
            None => {
                attempts::record_attempt(&tx, ts, source, false, None, Some(FailReason::NoMatch))?;
                tx.commit()?;
                return Ok(Decision::InvalidPin);
            }
        };

        // 3. Debounce: suppress a second tap at the same terminal. Not a
        // wrong PIN, so it never feeds the lockout counter.
        if let Some(last_ok) = attempts::last_successful(&tx, source)? {
            if (ts - last_ok.ts).num_seconds() < cfg.debounce_seconds {
                attempts::record_attempt(
                    &tx,
                    ts,
                    source,
                    false,
                    Some(employee.id),
                    Some(FailReason::DuplicateDebounced),
                )?;
                tx.commit()?;
                return Ok(Decision::DuplicateBlocked {
                    employee: Some(employee),
                });
            }
        }

        // 4. Punch direction: no open punch means clock in, an open punch
        // means clock out.
        let decision = match punches::open_punch_for(&tx, employee.id)? {
            None => {
                let punch = punches::clock_in(&tx, employee.id, ts, PunchMethod::Kiosk, note)?;
                audit::append_audit(
                    &tx,
                    "system",
                    "punch.clock_in",
                    "punch",
                    Some(punch.id),
                    Some(json!({ "employee_id": employee.id, "source": source })),
                )?;
                Decision::PunchedIn {
                    employee: employee.clone(),
                    punch,
                }
            }
            Some(open) => {
                let punch = punches::clock_out(&tx, open.id, ts)?;
                audit::append_audit(
                    &tx,
                    "system",
                    "punch.clock_out",
                    "punch",
                    Some(punch.id),
                    Some(json!({ "employee_id": employee.id, "source": source })),
                )?;
                Decision::PunchedOut {
                    employee: employee.clone(),
                    punch,
                }
            }
        };

        // 5. Record the successful attempt and commit everything at once.
        attempts::record_attempt(&tx, ts, source, true, Some(employee.id), None)?;
        tx.commit()?;
        Ok(decision)
    }
}
