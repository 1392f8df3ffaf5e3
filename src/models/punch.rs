use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum PunchMethod {
    Kiosk,
    Manual,
}

impl PunchMethod {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchMethod::Kiosk => "kiosk",
            PunchMethod::Manual => "manual",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "kiosk" => Some(PunchMethod::Kiosk),
            "manual" => Some(PunchMethod::Manual),
            _ => None,
        }
    }
}

/// One clock-in/clock-out pair. The record is "open" while `clock_out`
/// is still NULL; `clock_out` is the only field ever mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PunchRecord {
    pub id: i64,                           // ⇔ punches.id
    pub employee_id: i64,                  // ⇔ punches.employee_id
    pub clock_in: DateTime<Utc>,           // ⇔ punches.clock_in (TEXT, ISO8601 Z)
    pub clock_out: Option<DateTime<Utc>>,  // ⇔ punches.clock_out (nullable)
    pub method: PunchMethod,               // ⇔ punches.method ('kiosk' | 'manual')
    pub note: Option<String>,              // ⇔ punches.note
}

impl PunchRecord {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Worked seconds for a closed punch, 0 while still open.
    pub fn duration_seconds(&self) -> i64 {
        match self.clock_out {
            Some(out) => (out - self.clock_in).num_seconds().max(0),
            None => 0,
        }
    }
}
