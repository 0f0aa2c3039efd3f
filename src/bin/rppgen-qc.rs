//! Standalone template QC.
//!
//! Checks `reaper/templates/lalo_standard_v01.rpp` under `RPPGEN_ROOT` (or the
//! current directory) and prints `OK: ...` or `FAIL: ...`. Takes no arguments.

use std::process;

use rppgen::{qc, Layout};

fn main() {
    let path = Layout::from_env().template();

    match qc::check_file(&path) {
        Ok(pass) => {
            println!("OK: {}", pass.message());
        }
        Err(failure) => {
            println!("FAIL: {}", failure);
            process::exit(1);
        }
    }
}
