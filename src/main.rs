//! Scatt - Structural metrics for archived Scratch 2 projects

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = scatt::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
