//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Resolve configuration
//! 2. Open the chirp store (a bad store file aborts startup)
//! 3. Start the HTTP server on a multi-threaded tokio runtime

use std::path::Path;
use std::sync::Arc;

use crate::api::ChirpHandler;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};
use crate::storage::ChirpStore;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Open the store and serve the HTTP API until Ctrl-C.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::resolve(config_path, port)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("database_path", config.database_path.as_str()),
            ("port", config.port.to_string().as_str()),
        ],
    );

    let handler = boot(&config)?;
    let server = HttpServer::with_config(config.http_config(), handler);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    log_event(Event::ShutdownComplete);
    Ok(())
}

/// Open the chirp store and build the request handler.
///
/// A store that cannot be opened is fatal: no handler is built.
pub fn boot(config: &Config) -> CliResult<Arc<ChirpHandler>> {
    let store = ChirpStore::open(config.database_path()).map_err(|e| {
        log_event_with_fields(
            Event::StoreInitFailed,
            &[("code", e.code().code()), ("reason", e.to_string().as_str())],
        );
        CliError::boot_failed(e.to_string())
    })?;

    let count = store
        .count()
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    let metrics = Arc::new(MetricsRegistry::new());
    metrics.set_chirps_stored(count as u64);

    log_event_with_fields(
        Event::StoreLoaded,
        &[
            ("chirps", count.to_string().as_str()),
            ("path", config.database_path.as_str()),
        ],
    );

    Ok(Arc::new(ChirpHandler::new(
        Arc::new(store),
        config.profanity_filter(),
        metrics,
    )))
}
