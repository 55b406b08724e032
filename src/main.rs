//! CaskMark CLI - local-first whisky cask registry

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = caskmark::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
