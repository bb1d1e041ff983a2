use std::process::exit;

use blogpager::app::{print_status, run_cli};

fn main() {
    if let Err(e) = run_cli() {
        print_status("ERR", &e);
        exit(1);
    }
}
