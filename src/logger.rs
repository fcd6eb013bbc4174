//! File logging for the demo binary.
//!
//! Stdout belongs to the spinner line, so log events go to
//! `$XDG_STATE_HOME/spinline/spinline.log` instead of the terminal.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding an explicit filter directive.
const LOG_ENV: &str = "SPINLINE_LOG";

const LOG_FILE: &str = "spinline.log";

/// Install the global subscriber.
///
/// The returned guard flushes buffered events when dropped, so keep it
/// alive until the program exits.
pub fn init(verbosity: u8) -> Result<WorkerGuard> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).context("Failed to create log directory")?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &dir, LOG_FILE,
    ));

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(UtcTime::rfc_3339())
                .with_thread_names(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Directory for the log file.
///
/// Checks XDG_STATE_HOME first, falls back to ~/.local/state.
fn log_dir() -> Result<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(state_home).join("spinline"));
    }

    if let Some(home_dir) = home::home_dir() {
        return Ok(home_dir.join(".local/state/spinline"));
    }

    anyhow::bail!("Could not determine state directory")
}
