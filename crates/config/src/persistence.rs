//! Config file discovery, reading and writing.
//!
//! Files may be JSON5 (comments, trailing commas) or plain JSON. Writes are
//! always pretty-printed JSON since `serde_json5` cannot serialize.
//!
//! Search order:
//!
//! 1. Working directory: `./dashboard.json5`, `./dashboard.json`
//! 2. User config directory: `~/.config/dashboard/config.json5`, `~/.config/dashboard/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// File names looked up in the working directory, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["dashboard.json5", "dashboard.json"];

/// Directory under the platform config dir holding the user config.
const USER_CONFIG_DIR: &str = "dashboard";

/// File names looked up in the user config directory, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Returns the first existing config file, if any.
///
/// # Examples
///
/// ```no_run
/// use dashboard_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Using config at {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    first_existing(Path::new("."), LOCAL_FILE_NAMES).or_else(|| {
        let dir = dirs::config_dir()?.join(USER_CONFIG_DIR);
        first_existing(&dir, USER_FILE_NAMES)
    })
}

/// Returns the first of `names` that exists under `dir`.
fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Returns the user configuration directory (`~/.config/dashboard/` on Unix).
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the path new user configs are written to.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join("config.json5"))
}

/// Reads and parses a JSON5 or JSON config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content does not parse
/// into `T`.
///
/// # Examples
///
/// ```no_run
/// use dashboard_config::{Config, persistence::read_config_file};
///
/// # fn main() -> dashboard_config::Result<()> {
/// let config: Config = read_config_file("dashboard.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes `config` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written, or the value
/// cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn reads_json5_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json5");
        std::fs::write(
            &path,
            r#"
            {
                // widgets refresh every few seconds
                name: "sample",
                value: 7,
            }
            "#,
        )
        .unwrap();

        let sample: Sample = read_config_file(&path).unwrap();
        assert_eq!(sample.name, "sample");
        assert_eq!(sample.value, 7);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_config_file::<Sample>("/nonexistent/dashboard.json").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
        assert!(err.to_string().contains("/nonexistent/dashboard.json"));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not valid json").unwrap();

        let err = read_config_file::<Sample>(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseJson5(_)));
    }

    #[test]
    fn write_creates_parents_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let sample = Sample {
            name: "sample".to_string(),
            value: 42,
        };

        write_config_file(&path, &sample).unwrap();
        assert_eq!(read_config_file::<Sample>(&path).unwrap(), sample);
    }

    #[test]
    fn json5_wins_over_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dashboard.json"), "{}").unwrap();
        std::fs::write(dir.path().join("dashboard.json5"), "{}").unwrap();

        let found = first_existing(dir.path(), LOCAL_FILE_NAMES).unwrap();
        assert!(found.ends_with("dashboard.json5"));
    }

    #[test]
    fn first_existing_ignores_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("dashboard.json5")).unwrap();

        assert!(first_existing(dir.path(), LOCAL_FILE_NAMES).is_none());
    }

    #[test]
    fn user_config_dir_ends_with_app_name() {
        if dirs::config_dir().is_some() {
            assert!(user_config_dir().unwrap().ends_with(USER_CONFIG_DIR));
        }
    }
}
