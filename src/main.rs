//! chirpy CLI entry point
//!
//! Parses arguments, runs the selected command, and on failure prints the
//! error to stderr and exits non-zero. All logic lives in the CLI module.

use chirpy::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
