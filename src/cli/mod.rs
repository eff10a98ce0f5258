//! CLI module for chirpy
//!
//! Provides command-line interface for:
//! - serve: Open the chirp store and serve the HTTP API

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{boot, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
