//! Tracing subscriber set-up.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// File name prefix of the rolling log files.
pub const LOG_FILE_NAME: &str = "nbplugins.log";

/// Initialize logging.
///
/// With `log_dir` set, logs go to a daily rolling file in that directory,
/// otherwise to stderr. The level is controlled with `RUST_LOG`
/// (default: `default_level`).
///
/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init_logging(log_dir: Option<&Path>, default_level: &str) -> Result<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create logs directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_dir.is_none())
        .with_target(true)
        .with_file(log_dir.is_some())
        .with_line_number(log_dir.is_some())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
