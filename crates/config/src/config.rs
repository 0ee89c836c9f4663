//! The top-level [`Config`] struct and its loading pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::ApiConfig;
use crate::env::{apply_env, apply_env_with};
use crate::error::Result;
use crate::logging::LogSettings;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::sampling::SamplingConfig;

/// All dashboard settings.
///
/// Every section has defaults, so an empty file (or no file at all) yields a
/// usable configuration.
///
/// # Examples
///
/// ```
/// use dashboard_config::{Config, SamplingConfig};
///
/// let config = Config {
///     sampling: SamplingConfig::with_interval(10),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log destination and verbosity.
    #[serde(default)]
    pub log: LogSettings,

    /// Remote task service connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// System gauge sampling cadence.
    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl Config {
    /// Loads the configuration for a normal run.
    ///
    /// Reads the first config file found by
    /// [`find_config_file`](crate::persistence::find_config_file) (or starts
    /// from defaults), applies `DASHBOARD_*` overrides and validates the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if a found file cannot be read or parsed, an
    /// environment variable is malformed, or validation fails.
    pub fn load() -> Result<Self> {
        let config = Self::discover()?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but leaves validation to the caller.
    ///
    /// Lets later layers such as command-line flags fix a value before the
    /// merged result is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if a found file cannot be read or parsed, or an
    /// environment variable is malformed.
    pub fn discover() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        apply_env(&mut config)?;
        Ok(config)
    }

    /// Loads and validates a specific file, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or validation
    /// fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dashboard_config::Config;
    ///
    /// # fn example() -> dashboard_config::Result<()> {
    /// let config = Config::load_from("staging.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a specific file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        read_config_file(path)
    }

    /// Applies `DASHBOARD_*` overrides resolved through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`](crate::ConfigError::InvalidEnv)
    /// if a set variable cannot be parsed.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        apply_env_with(self, lookup)
    }

    /// Saves the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first section error encountered.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.sampling.validate()?;
        Ok(())
    }
}
