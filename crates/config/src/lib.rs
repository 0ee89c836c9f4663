//! Configuration management for the dashboard application.
//!
//! This crate handles loading, validating, and persisting configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`logging`]: Log level, log file and debug settings
//! - [`api`]: Remote task service settings
//! - [`sampling`]: System metric sampling interval
//! - [`env`]: `DASHBOARD_*` environment overrides
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`DASHBOARD_*`)
//! 3. Local config (`./dashboard.json5` or `./dashboard.json`)
//! 4. User config (`~/.config/dashboard/config.json5` or `~/.config/dashboard/config.json`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use dashboard_config::Config;
//!
//! # fn example() -> dashboard_config::Result<()> {
//! let config = Config::load()?;
//! println!("Task service: {}", config.api.base_url);
//! println!("Sample every {} seconds", config.sampling.interval_secs);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod sampling;

// Re-export primary types at crate root for convenience
pub use api::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, Result};
pub use logging::{LogLevel, LogSettings};
pub use sampling::SamplingConfig;
