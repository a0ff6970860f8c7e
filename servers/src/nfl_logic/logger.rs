use std::io;
use std::path::Path;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file prefix; the daily appender adds the date suffix.
const LOG_FILE_PREFIX: &str = "server_nfl";

/// # Setup Logging
///
/// Installs the global `tracing` subscriber:
/// - console output, human-readable with ANSI colors;
/// - JSON lines in a daily rotating file under `log_dir`;
/// - filtering from `RUST_LOG`, falling back to `log_level`.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the process exits.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking_appender, guard) = non_blocking(file_appender);

    let console_layer = fmt::layer().with_target(true).with_ansi(true);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_appender)
        .json();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    info!("Logging initialized with level: {}", log_level);
    Ok(guard)
}
