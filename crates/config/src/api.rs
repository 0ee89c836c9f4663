//! Remote task service settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default base URL of the task service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout (10 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote task service.
///
/// # Examples
///
/// ```
/// use dashboard_config::ApiConfig;
///
/// let api = ApiConfig::default();
/// assert_eq!(api.base_url, "http://localhost:8080");
/// assert!(api.validate().is_ok());
///
/// let api = ApiConfig { base_url: "localhost:8080".into(), ..Default::default() };
/// assert!(api.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; requests go to `{base_url}/api/v1/tasks`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Returns the timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no `http`/`https` scheme or the
    /// timeout is zero.
    pub fn validate(&self) -> crate::Result<()> {
        let url = self.base_url.trim();
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
        if !has_host {
            return Err(crate::ConfigError::InvalidApi {
                reason: format!("base URL {url:?} must start with http:// or https://"),
            });
        }

        if self.timeout_secs == 0 {
            return Err(crate::ConfigError::InvalidApi {
                reason: "timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_is_accepted() {
        let api = ApiConfig {
            base_url: "https://tasks.example.com".to_string(),
            ..Default::default()
        };
        assert!(api.validate().is_ok());
    }

    #[test]
    fn bare_scheme_is_rejected() {
        let api = ApiConfig {
            base_url: "http://".to_string(),
            ..Default::default()
        };
        assert!(api.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let api = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        let err = api.validate().unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn timeout_converts_to_duration() {
        let api = ApiConfig {
            timeout_secs: 3,
            ..Default::default()
        };
        assert_eq!(api.timeout(), Duration::from_secs(3));
    }
}
