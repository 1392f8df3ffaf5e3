use crate::cli::parser::{AbsenceAction, Commands};
use crate::db;
use crate::db::absences::{add_absence, list_absences};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::parse_day;

/// Absence records: reporting-only data, no kiosk logic involved.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Absence { action } = cmd {
        let conn = db::open_db(&cfg.database)?;
        db::init_db(&conn)?;

        match action {
            AbsenceAction::Add {
                employee,
                day,
                reason,
            } => {
                let day = parse_day(day)?;
                add_absence(&conn, *employee, day, reason)?;
                success(format!(
                    "Absence recorded: employee={} day={}",
                    employee,
                    day.format("%Y-%m-%d")
                ));
            }
            AbsenceAction::List { employee } => {
                for a in list_absences(&conn, *employee)? {
                    println!("{}  {}", a.day.format("%Y-%m-%d"), a.reason);
                }
            }
        }
    }
    Ok(())
}
