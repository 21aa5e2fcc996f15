//! Logging init for the embedding application.
//!
//! Request handling and imports log to a file under the XDG state dir;
//! stderr is the fallback sink whenever the file is unavailable.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,lmc_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging to `~/.local/state/lmc/lmc.log`.
/// Returns Err when the state dir is unusable (permissions, read-only mount)
/// so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let state_home = xdg::BaseDirectories::with_prefix("lmc")?.get_state_home();
    fs::create_dir_all(&state_home)
        .with_context(|| format!("create log dir {}", state_home.display()))?;

    let log_path = state_home.join("lmc.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    // Every log line clones the handle; if a clone ever fails, the line goes
    // to stderr instead of being dropped.
    let writer = BoxMakeWriter::new(move || -> Box<dyn io::Write + Send> {
        match file.try_clone() {
            Ok(f) => Box::new(f),
            Err(_) => Box::new(io::stderr()),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("logging to {}", log_path.display());
    Ok(())
}

/// Initialize logging to stderr only (no file). Use when [`init_logging`]
/// fails so the embedding application keeps running.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
