use crate::cli::parser::Commands;
use crate::db;
use crate::db::audit::list_audit;
use crate::errors::AppResult;

/// Print recent audit log rows, newest first.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Audit { limit } = cmd {
        let conn = db::open_db(&cfg.database)?;
        db::init_db(&conn)?;

        for line in list_audit(&conn, *limit)? {
            println!("{}", line);
        }
    }
    Ok(())
}
