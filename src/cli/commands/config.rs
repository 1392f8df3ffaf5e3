use crate::cli::parser::Commands;
use crate::db;
use crate::db::settings::{get_setting, list_settings, set_setting};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Read or change settings rows. Value semantics are validated by the
/// consumers, not here.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Config { get, set, list } = cmd {
        let conn = db::open_db(&cfg.database)?;
        db::init_db(&conn)?;

        if let Some(key) = get {
            match get_setting(&conn, key)? {
                Some(value) => println!("{} = {}", key, value),
                None => warning(format!("No setting named '{}'", key)),
            }
            return Ok(());
        }

        if let Some(pair) = set {
            let (key, value) = match pair.as_slice() {
                [key, value] => (key, value),
                _ => return Err(AppError::Config("--set expects KEY VALUE".to_string())),
            };
            set_setting(&conn, key, value)?;
            success(format!("{} = {}", key, value));
            return Ok(());
        }

        if *list {
            for (key, value) in list_settings(&conn)? {
                println!("{} = {}", key, value);
            }
            return Ok(());
        }

        warning("Nothing to do: pass --get, --set or --list");
    }
    Ok(())
}
