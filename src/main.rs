//! clockdesk main entrypoint.

use clockdesk::run;
use clockdesk::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
