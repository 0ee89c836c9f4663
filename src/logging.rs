//! File logging setup.
//!
//! The terminal belongs to the dashboard, so logs go to the configured file.
//! There is no rotation: a file already larger than the cap is truncated at
//! startup, otherwise new entries are appended.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use dashboard_config::LogSettings;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a full `tracing` filter directive.
///
/// Takes precedence over the configured level when set.
pub const FILTER_ENV: &str = "DASHBOARD_LOG";

/// Opens the log file for writing, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn open_log_file(path: &Path, max_bytes: u64) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let oversized = fs::metadata(path).is_ok_and(|meta| meta.len() > max_bytes);
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(!oversized)
        .truncate(oversized)
        .open(path)
}

/// Builds the filter from `DASHBOARD_LOG` or the configured level.
fn filter(settings: &LogSettings) -> anyhow::Result<EnvFilter> {
    match std::env::var(FILTER_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(&directive)
            .with_context(|| format!("invalid {FILTER_ENV} filter {directive:?}")),
        _ => Ok(EnvFilter::new(settings.effective_level().to_string())),
    }
}

/// Installs the global `tracing` subscriber writing to the configured file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened, the filter is invalid,
/// or a subscriber is already installed.
pub fn init(settings: &LogSettings) -> anyhow::Result<()> {
    let file = open_log_file(&settings.file, settings.max_size_bytes())
        .with_context(|| format!("failed to open log file {}", settings.file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(settings)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")
}
