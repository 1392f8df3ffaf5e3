use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a PIN submission failed. Successful attempts carry no reason.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FailReason {
    NoMatch,
    LockedOut,
    DuplicateDebounced,
}

impl FailReason {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            FailReason::NoMatch => "no_match",
            FailReason::LockedOut => "locked_out",
            FailReason::DuplicateDebounced => "duplicate_debounced",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "no_match" => Some(FailReason::NoMatch),
            "locked_out" => Some(FailReason::LockedOut),
            "duplicate_debounced" => Some(FailReason::DuplicateDebounced),
            _ => None,
        }
    }
}

/// One row of the append-only PIN attempt ledger. This is the audit trail
/// the lockout and debounce windows query against; rows are never mutated
/// or deleted.
#[derive(Debug, Clone, Serialize)]
pub struct PinAttempt {
    pub id: i64,                     // ⇔ pin_attempts.id
    pub ts: DateTime<Utc>,           // ⇔ pin_attempts.ts (TEXT, ISO8601 Z)
    pub source: String,              // ⇔ pin_attempts.source (terminal id)
    pub success: bool,               // ⇔ pin_attempts.success (INT 0/1)
    pub employee_id: Option<i64>,    // ⇔ pin_attempts.employee_id (nullable)
    pub reason: Option<FailReason>,  // ⇔ pin_attempts.reason (nullable)
}
