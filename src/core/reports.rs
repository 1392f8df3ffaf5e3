//! Attendance report aggregation over closed punches.

use crate::db::punches::total_seconds_worked;
use crate::errors::AppResult;
use crate::utils::time::{day_end, day_start};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Per-day worked seconds over [start_day, end_day), one bucket per
/// calendar day (UTC), zero-filled so gaps are visible in the report.
pub fn daily_totals(
    conn: &Connection,
    employee_id: i64,
    start_day: NaiveDate,
    end_day: NaiveDate,
) -> AppResult<Vec<(NaiveDate, i64)>> {
    let mut out = Vec::new();
    let mut day = start_day;
    while day < end_day {
        let secs = total_seconds_worked(conn, employee_id, day_start(day), day_end(day))?;
        out.push((day, secs));
        day += chrono::Duration::days(1);
    }
    Ok(out)
}

/// Total worked seconds over [start_day, end_day).
pub fn period_total(
    conn: &Connection,
    employee_id: i64,
    start_day: NaiveDate,
    end_day: NaiveDate,
) -> AppResult<i64> {
    total_seconds_worked(conn, employee_id, day_start(start_day), day_start(end_day))
}

/// "7h 30m" style rendering for report tables.
pub fn format_seconds(secs: i64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{}h {:02}m", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::employees::add_employee;
    use crate::db::punches::{clock_in, clock_out};
    use crate::db::{init_db, open_in_memory};
    use crate::models::PunchMethod;
    use crate::utils::time::parse_day;
    use chrono::{TimeZone, Utc};

    #[test]
    fn buckets_per_day_and_period_total() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let emp = add_employee(&conn, "Alice", 18.5, "1234").unwrap();

        // 8h on June 2nd, 4h on June 3rd, nothing on June 4th.
        let p = clock_in(
            &conn,
            emp.id,
            Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
            PunchMethod::Kiosk,
            None,
        )
        .unwrap();
        clock_out(&conn, p.id, Utc.with_ymd_and_hms(2025, 6, 2, 17, 0, 0).unwrap()).unwrap();
        let p = clock_in(
            &conn,
            emp.id,
            Utc.with_ymd_and_hms(2025, 6, 3, 9, 0, 0).unwrap(),
            PunchMethod::Kiosk,
            None,
        )
        .unwrap();
        clock_out(&conn, p.id, Utc.with_ymd_and_hms(2025, 6, 3, 13, 0, 0).unwrap()).unwrap();

        let start = parse_day("2025-06-02").unwrap();
        let end = parse_day("2025-06-05").unwrap();
        let rows = daily_totals(&conn, emp.id, start, end).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].1, 8 * 3600);
        assert_eq!(rows[1].1, 4 * 3600);
        assert_eq!(rows[2].1, 0);

        assert_eq!(period_total(&conn, emp.id, start, end).unwrap(), 12 * 3600);
    }

    #[test]
    fn overnight_punch_splits_across_days() {
        let conn = open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let emp = add_employee(&conn, "Nightshift", 20.0, "1234").unwrap();

        let p = clock_in(
            &conn,
            emp.id,
            Utc.with_ymd_and_hms(2025, 6, 2, 22, 0, 0).unwrap(),
            PunchMethod::Kiosk,
            None,
        )
        .unwrap();
        clock_out(&conn, p.id, Utc.with_ymd_and_hms(2025, 6, 3, 6, 0, 0).unwrap()).unwrap();

        let start = parse_day("2025-06-02").unwrap();
        let end = parse_day("2025-06-04").unwrap();
        let rows = daily_totals(&conn, emp.id, start, end).unwrap();
        assert_eq!(rows[0].1, 2 * 3600);
        assert_eq!(rows[1].1, 6 * 3600);
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_seconds(0), "0h 00m");
        assert_eq!(format_seconds(8 * 3600 + 5 * 60), "8h 05m");
    }
}
