//! Tracing setup.
//!
//! The TUI owns the terminal, so log output goes to `.slashpad/slashpad.log`
//! instead of stderr. The filter is read from `SLASHPAD_LOG` and defaults to
//! `slashpad=info`.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::fs::SlashpadPaths;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "SLASHPAD_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "slashpad=info";

/// Builds the filter from [`LOG_ENV`], falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to the log file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init(paths: &SlashpadPaths) -> Result<()> {
    paths.ensure_data_dir()?;
    let log_path = paths.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(path = %log_path.display(), "slashpad tracing initialized");
    Ok(())
}
