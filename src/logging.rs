// Tracing setup shared by the server binaries

use anyhow::{Context, Result};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "kestrel.log";

/// Install console (stderr) and daily rolling file logging.
///
/// `RUST_LOG` wins over the configured filter. The returned guards flush the
/// non-blocking writers on drop, so the caller keeps them alive until exit.
pub fn init_logging(config: &LoggingConfig) -> Result<Vec<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .with_context(|| format!("Invalid log filter '{}'", config.filter))?;

    fs::create_dir_all(&config.directory).with_context(|| {
        format!(
            "Failed to create logs directory {}",
            config.directory.display()
        )
    })?;

    let file_appender = rolling::daily(&config.directory, LOG_FILE_NAME);
    let (non_blocking_file, file_guard) = non_blocking(file_appender);

    // stdout carries the stdio transport
    let (non_blocking_console, console_guard) = non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking_console)
                .with_target(false)
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking_file)
                .with_target(true)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(vec![file_guard, console_guard])
}

/// Stderr-only logging for the command-line tools
pub fn init_cli_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
