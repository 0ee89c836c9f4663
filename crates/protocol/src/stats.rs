//! System resource usage snapshots.

use serde::{Deserialize, Serialize};

/// A point-in-time sample of system resource usage.
///
/// All values are percentages clamped to `0.0..=100.0`.
///
/// # Examples
///
/// ```
/// use dashboard_protocol::SystemStats;
///
/// let stats = SystemStats::new(42.0, 63.5, 120.0);
/// assert_eq!(stats.cpu_percent, 42.0);
/// assert_eq!(stats.disk_percent, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemStats {
    /// Global CPU usage.
    pub cpu_percent: f64,
    /// Used memory relative to total memory.
    pub memory_percent: f64,
    /// Used space on the root filesystem.
    pub disk_percent: f64,
}

impl SystemStats {
    /// Creates a snapshot, clamping every value into the percentage range.
    #[must_use]
    pub fn new(cpu_percent: f64, memory_percent: f64, disk_percent: f64) -> Self {
        Self {
            cpu_percent: clamp_percent(cpu_percent),
            memory_percent: clamp_percent(memory_percent),
            disk_percent: clamp_percent(disk_percent),
        }
    }

    /// Computes `used / total` as a percentage, returning `0.0` when `total` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_protocol::SystemStats;
    ///
    /// assert_eq!(SystemStats::ratio(50, 200), 25.0);
    /// assert_eq!(SystemStats::ratio(10, 0), 0.0);
    /// ```
    #[must_use]
    pub fn ratio(used: u64, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        clamp_percent(used as f64 / total as f64 * 100.0)
    }
}

/// Clamps a value into `0.0..=100.0`, mapping NaN to `0.0`.
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
