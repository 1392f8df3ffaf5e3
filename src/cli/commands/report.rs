use crate::cli::parser::Commands;
use crate::core::reports::{daily_totals, format_seconds, period_total};
use crate::db;
use crate::db::employees::get_employee;
use crate::errors::{AppError, AppResult};
use crate::export::write_daily_totals_csv;
use crate::ui::messages::{info, success};
use crate::utils::time::parse_day;

/// Daily totals table (or CSV file) for one employee over [from, to).
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Report {
        employee,
        from,
        to,
        csv,
    } = cmd
    {
        let start = parse_day(from)?;
        let end = parse_day(to)?;

        let conn = db::open_db(&cfg.database)?;
        db::init_db(&conn)?;

        let emp = get_employee(&conn, *employee)?.ok_or(AppError::EmployeeNotFound(*employee))?;
        let rows = daily_totals(&conn, emp.id, start, end)?;

        if let Some(path) = csv {
            write_daily_totals_csv(path, emp.id, &rows)?;
            success(format!("Report written: {}", path));
            return Ok(());
        }

        info(format!("Attendance for {} (id={})", emp.name, emp.id));
        for (day, secs) in &rows {
            println!("{}  {}", day.format("%Y-%m-%d"), format_seconds(*secs));
        }
        let total = period_total(&conn, emp.id, start, end)?;
        println!("Total: {}", format_seconds(total));
    }
    Ok(())
}
