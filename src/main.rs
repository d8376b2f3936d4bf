//! shiftguard main entrypoint.

use shiftguard::run;
use shiftguard::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
