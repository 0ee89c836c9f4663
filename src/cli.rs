//! Command-line flags and their merge into the loaded configuration.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dashboard_config::{Config, LogLevel};

/// A terminal dashboard of system gauges and remote tasks.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error or off.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Base URL of the task service.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Development mode: log at debug level or more.
    #[arg(short, long)]
    pub debug: bool,

    /// Seconds between system samples.
    #[arg(short, long, value_name = "SECONDS")]
    pub interval: Option<u32>,
}

impl Cli {
    /// Loads the configuration and applies the flags on top.
    ///
    /// An explicit `--config` file replaces the search path; environment
    /// overrides apply either way. Validation runs once, on the merged
    /// result, so a flag can fix a bad file or environment value.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the merged result is invalid.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = Config::read_from(path)
                    .with_context(|| format!("failed to load config from {}", path.display()))?;
                config
                    .apply_env_with(|name| std::env::var(name).ok())
                    .context("invalid environment override")?;
                config
            }
            None => Config::discover().context("failed to load config")?,
        };

        self.apply(&mut config);
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    /// Overwrites the settings given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = self.log_level {
            config.log.level = level;
        }
        if let Some(file) = &self.log_file {
            config.log.file.clone_from(file);
        }
        if let Some(url) = &self.api_url {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        if self.debug {
            config.log.debug = true;
        }
        if let Some(interval) = self.interval {
            config.sampling.interval_secs = interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dashboard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_change_nothing() {
        let mut config = Config::default();
        parse(&[]).apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "--log-level",
            "warning",
            "--log-file",
            "/tmp/dash.log",
            "--api-url",
            "https://tasks.example.com/",
            "--debug",
            "--interval",
            "15",
        ]);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.log.level, LogLevel::Warn);
        assert_eq!(config.log.file, PathBuf::from("/tmp/dash.log"));
        assert_eq!(config.api.base_url, "https://tasks.example.com");
        assert!(config.log.debug);
        assert_eq!(config.sampling.interval_secs, 15);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result = Cli::try_parse_from(["dashboard", "--log-level", "loud"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_interval_fails_resolution() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, "{}").unwrap();

        let cli = parse(&["--config", path.to_str().unwrap(), "--interval", "0"]);
        let err = cli.resolve_config().unwrap_err();
        assert!(format!("{err:#}").contains("below minimum"));
    }

    #[test]
    fn flag_fixes_invalid_file_value() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json5");
        std::fs::write(&path, "{ sampling: { interval_secs: 0 } }").unwrap();

        let cli = parse(&["--config", path.to_str().unwrap(), "--interval", "5"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.sampling.interval_secs, 5);
    }

    #[test]
    fn invalid_file_value_without_fix_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json5");
        std::fs::write(&path, "{ sampling: { interval_secs: 0 } }").unwrap();

        let cli = parse(&["--config", path.to_str().unwrap()]);
        let err = cli.resolve_config().unwrap_err();
        assert!(format!("{err:#}").contains("below minimum"));
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let cli = parse(&["--config", "/nonexistent/dashboard.json5"]);
        let err = cli.resolve_config().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dashboard.json5"));
    }
}
