use crate::cli::parser::{Commands, EmployeeAction};
use crate::core::security::is_valid_pin;
use crate::db;
use crate::db::employees::{add_employee, disable_employee, list_employees, reset_employee_pin};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Employee registry operations. Every mutation lands in the audit log.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Employee { action } = cmd {
        let conn = db::open_db(&cfg.database)?;
        db::init_db(&conn)?;

        match action {
            EmployeeAction::Add { name, rate, pin } => {
                if !is_valid_pin(pin) {
                    return Err(AppError::Config(
                        "PIN must be a short numeric string".to_string(),
                    ));
                }
                let emp = add_employee(&conn, name, *rate, pin)?;
                success(format!("Employee added: id={} name={}", emp.id, emp.name));
            }
            EmployeeAction::Disable { id } => {
                disable_employee(&conn, *id)?;
                success(format!("Employee disabled: id={}", id));
            }
            EmployeeAction::ResetPin { id, pin } => {
                if !is_valid_pin(pin) {
                    return Err(AppError::Config(
                        "PIN must be a short numeric string".to_string(),
                    ));
                }
                reset_employee_pin(&conn, *id, pin)?;
                success(format!("PIN reset for employee id={}", id));
            }
            EmployeeAction::List { all } => {
                for emp in list_employees(&conn, !all)? {
                    println!(
                        "{:>4}  {}  rate={:.2}  {}",
                        emp.id,
                        emp.name,
                        emp.pay_rate,
                        if emp.active { "active" } else { "disabled" }
                    );
                }
            }
        }
    }
    Ok(())
}
