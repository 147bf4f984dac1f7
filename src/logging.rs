//! Log setup for the terminal game
//!
//! The TUI owns stdout/stderr while a game runs, so events are only recorded
//! when a log file is given. The level comes from `RUST_LOG` (default `info`).

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a global subscriber writing to `log_file`. Without a file this is a no-op.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(())
}
