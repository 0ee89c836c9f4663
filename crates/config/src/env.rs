//! `DASHBOARD_*` environment variable overrides.
//!
//! Environment values sit between the config file and command-line flags.
//! Unset or empty variables leave the file value alone; a set variable that
//! does not parse is an error rather than being silently ignored.

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;

/// Minimum log level.
pub const LOG_LEVEL: &str = "DASHBOARD_LOG_LEVEL";
/// Log file path.
pub const LOG_FILE: &str = "DASHBOARD_LOG_FILE";
/// Log file size cap in megabytes.
pub const LOG_MAX_SIZE_MB: &str = "DASHBOARD_LOG_MAX_SIZE_MB";
/// Development mode flag.
pub const DEBUG: &str = "DASHBOARD_DEBUG";
/// Task service base URL.
pub const API_URL: &str = "DASHBOARD_API_URL";
/// Task service request timeout in seconds.
pub const API_TIMEOUT_SECS: &str = "DASHBOARD_API_TIMEOUT_SECS";
/// Gauge sampling interval in seconds.
pub const SAMPLE_INTERVAL_SECS: &str = "DASHBOARD_SAMPLE_INTERVAL_SECS";

/// Applies overrides from the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnv`] if a set variable cannot be parsed.
pub fn apply_env(config: &mut Config) -> Result<()> {
    apply_env_with(config, |name| std::env::var(name).ok())
}

/// Applies overrides using `lookup` to resolve variable names.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnv`] if a set variable cannot be parsed.
///
/// # Examples
///
/// ```
/// use dashboard_config::{Config, LogLevel, env};
///
/// let mut config = Config::default();
/// env::apply_env_with(&mut config, |name| match name {
///     "DASHBOARD_LOG_LEVEL" => Some("debug".to_string()),
///     "DASHBOARD_SAMPLE_INTERVAL_SECS" => Some("5".to_string()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(config.log.level, LogLevel::Debug);
/// assert_eq!(config.sampling.interval_secs, 5);
/// ```
pub fn apply_env_with<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(value) = get(LOG_LEVEL) {
        config.log.level = LogLevel::from_str(value.trim()).map_err(|reason| {
            ConfigError::InvalidEnv {
                name: LOG_LEVEL,
                value: value.clone(),
                reason,
            }
        })?;
    }
    if let Some(value) = get(LOG_FILE) {
        config.log.file = PathBuf::from(value);
    }
    if let Some(value) = get(LOG_MAX_SIZE_MB) {
        config.log.max_size_mb = parse_number(LOG_MAX_SIZE_MB, &value)?;
    }
    if let Some(value) = get(DEBUG) {
        config.log.debug = parse_flag(DEBUG, &value)?;
    }
    if let Some(value) = get(API_URL) {
        config.api.base_url = value.trim().trim_end_matches('/').to_string();
    }
    if let Some(value) = get(API_TIMEOUT_SECS) {
        config.api.timeout_secs = parse_number(API_TIMEOUT_SECS, &value)?;
    }
    if let Some(value) = get(SAMPLE_INTERVAL_SECS) {
        config.sampling.interval_secs = parse_number(SAMPLE_INTERVAL_SECS, &value)?;
    }

    Ok(())
}

fn parse_number<T>(name: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn apply(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        apply_env_with(&mut config, |name| vars.get(name).cloned())?;
        Ok(config)
    }

    #[test]
    fn no_variables_leaves_defaults() {
        assert_eq!(apply(&[]).unwrap(), Config::default());
    }

    #[test]
    fn every_variable_is_applied() {
        let config = apply(&[
            (LOG_LEVEL, "warn"),
            (LOG_FILE, "/tmp/dash.log"),
            (LOG_MAX_SIZE_MB, "3"),
            (DEBUG, "yes"),
            (API_URL, "http://tasks.local:9000/"),
            (API_TIMEOUT_SECS, "4"),
            (SAMPLE_INTERVAL_SECS, "15"),
        ])
        .unwrap();

        assert_eq!(config.log.level, LogLevel::Warn);
        assert_eq!(config.log.file, PathBuf::from("/tmp/dash.log"));
        assert_eq!(config.log.max_size_mb, 3);
        assert!(config.log.debug);
        assert_eq!(config.api.base_url, "http://tasks.local:9000");
        assert_eq!(config.api.timeout_secs, 4);
        assert_eq!(config.sampling.interval_secs, 15);
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = apply(&[(API_URL, "  "), (DEBUG, "")]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_number_names_the_variable() {
        let err = apply(&[(SAMPLE_INTERVAL_SECS, "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { name: SAMPLE_INTERVAL_SECS, .. }
        ));
    }

    #[test]
    fn bad_flag_is_rejected() {
        let err = apply(&[(DEBUG, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(DEBUG));
    }

    #[test]
    fn bad_level_is_rejected() {
        let err = apply(&[(LOG_LEVEL, "chatty")]).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }
}
