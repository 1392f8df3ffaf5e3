//! Kiosk result banners: one short, unambiguous line per decision,
//! readable from across a counter.

use crate::models::Decision;
use crate::utils::time::format_utc;
use ansi_term::Colour::{Green, Red, Yellow};

/// Render the decision for the kiosk terminal. The mapping lives here so
/// the engine stays display-free.
pub fn render_decision(decision: &Decision) {
    match decision {
        Decision::PunchedIn { employee, punch } => {
            println!(
                "{} {} clocked IN at {}. Have a great shift!",
                Green.bold().paint("IN "),
                employee.name,
                format_utc(punch.clock_in)
            );
        }
        Decision::PunchedOut { employee, punch } => {
            let when = punch.clock_out.map(format_utc).unwrap_or_default();
            println!(
                "{} {} clocked OUT at {}. See you next time!",
                Green.bold().paint("OUT"),
                employee.name,
                when
            );
        }
        Decision::DuplicateBlocked { .. } => {
            println!(
                "{} Duplicate punch blocked. Try again in a moment.",
                Yellow.bold().paint("DUP")
            );
        }
        Decision::LockedOut { retry_after_seconds } => {
            println!(
                "{} Too many attempts. Locked out, retry in {}s.",
                Red.bold().paint("LCK"),
                retry_after_seconds
            );
        }
        Decision::InvalidPin => {
            println!("{} Invalid PIN.", Red.bold().paint("ERR"));
        }
    }
}
