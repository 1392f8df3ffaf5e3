use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create the config file and database, run migrations, seed defaults.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    let conn = db::open_db(&db_path)?;
    db::init_db(&conn)?;

    success(format!("Database ready: {}", db_path.display()));
    Ok(())
}
