use crate::cli::parser::{Commands, KioskAction};
use crate::core::kiosk::KioskEngine;
use crate::db;
use crate::errors::AppResult;
use crate::ui::banner::render_decision;
use crate::utils::time::{parse_utc, utc_now};
use std::io::{self, BufRead, Write};

/// One PIN submission from a kiosk terminal.
///
/// `--pin` and `--at` exist for scripting and tests; interactive use reads
/// the PIN from stdin and stamps the submission with the current instant.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Kiosk { action } = cmd {
        let KioskAction::Pin {
            source,
            pin,
            at,
            note,
        } = action;

        let source = source.clone().unwrap_or_else(|| cfg.kiosk_source.clone());
        let ts = match at {
            Some(s) => parse_utc(s)?,
            None => utc_now(),
        };
        let pin = match pin {
            Some(p) => p.clone(),
            None => prompt_pin()?,
        };

        let mut conn = db::open_db(&cfg.database)?;
        db::init_db(&conn)?;

        let decision = KioskEngine::new(&mut conn).submit(&pin, &source, ts, note.as_deref())?;
        render_decision(&decision);
    }
    Ok(())
}

fn prompt_pin() -> AppResult<String> {
    print!("Enter PIN: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
