//! PunchPad main entrypoint.

use punchpad::run;
use punchpad::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
