//! CSV export of report rows.

use crate::errors::AppResult;
use chrono::NaiveDate;
use csv::Writer;

/// Write daily totals as `date,employee_id,seconds` rows. The header is
/// written even when there are no rows.
pub fn write_daily_totals_csv(
    path: &str,
    employee_id: i64,
    rows: &[(NaiveDate, i64)],
) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["date", "employee_id", "seconds"])?;
    for (day, secs) in rows {
        wtr.write_record(&[
            day.format("%Y-%m-%d").to_string(),
            employee_id.to_string(),
            secs.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
