use chrono::NaiveDate;
use serde::Serialize;

/// Reporting-only row: no decision logic depends on it.
#[derive(Debug, Clone, Serialize)]
pub struct AbsenceRecord {
    pub id: i64,           // ⇔ absences.id
    pub employee_id: i64,  // ⇔ absences.employee_id
    pub day: NaiveDate,    // ⇔ absences.day (TEXT "YYYY-MM-DD", unique with employee_id)
    pub reason: String,    // ⇔ absences.reason
}
