use super::{Employee, PunchRecord};

/// Outcome of a single kiosk PIN submission. None of these are errors:
/// every variant corresponds to exactly one recorded pin_attempts row.
#[derive(Debug, Clone)]
pub enum Decision {
    PunchedIn {
        employee: Employee,
        punch: PunchRecord,
    },
    PunchedOut {
        employee: Employee,
        punch: PunchRecord,
    },
    DuplicateBlocked {
        employee: Option<Employee>,
    },
    LockedOut {
        retry_after_seconds: i64,
    },
    InvalidPin,
}
