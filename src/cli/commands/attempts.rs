use crate::cli::parser::Commands;
use crate::db;
use crate::db::attempts::list_attempts;
use crate::errors::AppResult;
use crate::utils::time::format_utc;

/// Print recent PIN attempts for one source, newest first.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Attempts { source, limit } = cmd {
        let conn = db::open_db(&cfg.database)?;
        db::init_db(&conn)?;

        for a in list_attempts(&conn, source, *limit)? {
            println!(
                "{}  {}  {}  employee={}  {}",
                format_utc(a.ts),
                a.source,
                if a.success { "ok" } else { "fail" },
                a.employee_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                a.reason.map(|r| r.to_db_str()).unwrap_or("-")
            );
        }
    }
    Ok(())
}
