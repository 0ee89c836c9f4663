//! Sampling interval configuration for the system gauges.
//!
//! The gauges widget samples CPU, memory and disk usage on a fixed cadence.
//! Sampling CPU usage itself takes a short measurement window, so very short
//! intervals are rejected rather than letting samples pile up.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default sampling interval (2 seconds).
pub const DEFAULT_SAMPLING_INTERVAL: u32 = 2;

/// Minimum allowed sampling interval (1 second).
pub const MIN_SAMPLING_INTERVAL: u32 = 1;

/// Maximum allowed sampling interval (1 hour).
pub const MAX_SAMPLING_INTERVAL: u32 = 3600;

/// Configuration for system metric sampling.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use dashboard_config::SamplingConfig;
///
/// let config = SamplingConfig::default();
/// assert_eq!(config.interval(), Duration::from_secs(2));
///
/// let config = SamplingConfig::with_interval(30);
/// assert_eq!(config.interval_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// The sampling interval in seconds.
    #[serde(default = "default_interval")]
    pub interval_secs: u32,
}

fn default_interval() -> u32 {
    DEFAULT_SAMPLING_INTERVAL
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SAMPLING_INTERVAL,
        }
    }
}

impl SamplingConfig {
    /// Creates a sampling configuration with the specified interval.
    #[must_use]
    pub fn with_interval(interval_secs: u32) -> Self {
        Self { interval_secs }
    }

    /// Returns the interval as a [`Duration`].
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_secs))
    }

    /// Validates the sampling configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is outside the allowed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_config::SamplingConfig;
    ///
    /// assert!(SamplingConfig::with_interval(5).validate().is_ok());
    /// assert!(SamplingConfig::with_interval(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> crate::Result<()> {
        if self.interval_secs < MIN_SAMPLING_INTERVAL {
            return Err(crate::ConfigError::InvalidSamplingInterval {
                reason: format!(
                    "interval {} is below minimum of {} seconds",
                    self.interval_secs, MIN_SAMPLING_INTERVAL
                ),
            });
        }

        if self.interval_secs > MAX_SAMPLING_INTERVAL {
            return Err(crate::ConfigError::InvalidSamplingInterval {
                reason: format!(
                    "interval {} exceeds maximum of {} seconds",
                    self.interval_secs, MAX_SAMPLING_INTERVAL
                ),
            });
        }

        Ok(())
    }
}
