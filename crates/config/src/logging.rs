//! Log level, log file and debug settings.
//!
//! The terminal owns stdout while the dashboard runs, so logs always go to a
//! file. These settings describe where that file lives and how verbose it is;
//! the binary turns them into a `tracing` subscriber.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default log file location, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs/dashboard.log";

/// Default size cap for the log file, in megabytes.
pub const DEFAULT_MAX_SIZE_MB: u64 = 10;

/// Log level filter.
///
/// # Examples
///
/// ```
/// use dashboard_config::LogLevel;
///
/// let level: LogLevel = "WARNING".parse().unwrap();
/// assert_eq!(level, LogLevel::Warn);
/// assert_eq!(level.to_string(), "warn");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Completely silent.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Standard operational info (default).
    #[default]
    Info,
    /// Debug information.
    Debug,
    /// Most verbose.
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "off" | "none" | "quiet" => Ok(Self::Off),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Off => "off",
        };
        f.write_str(name)
    }
}

/// Logging configuration.
///
/// # Examples
///
/// ```
/// use dashboard_config::{LogLevel, LogSettings};
///
/// let settings = LogSettings {
///     level: LogLevel::Warn,
///     debug: true,
///     ..Default::default()
/// };
/// assert_eq!(settings.effective_level(), LogLevel::Debug);
/// assert_eq!(settings.max_size_bytes(), 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Minimum level written to the log file.
    #[serde(default)]
    pub level: LogLevel,

    /// Path of the log file.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Size cap in megabytes; a larger file is truncated at startup.
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,

    /// Development mode: raises the level to at least `debug`.
    #[serde(default)]
    pub debug: bool,
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_max_size_mb() -> u64 {
    DEFAULT_MAX_SIZE_MB
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            file: default_log_file(),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            debug: false,
        }
    }
}

impl LogSettings {
    /// Returns the level to filter at, taking the debug flag into account.
    #[must_use]
    pub fn effective_level(&self) -> LogLevel {
        if self.debug {
            self.level.max(LogLevel::Debug)
        } else {
            self.level
        }
    }

    /// Returns the size cap in bytes.
    #[must_use]
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}
