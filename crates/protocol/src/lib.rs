//! Shared protocol types for the dashboard application.
//!
//! This crate defines the plain data types that cross crate boundaries:
//! the task records exchanged with the remote task service and the system
//! statistics sampled by the gauges widget.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task records and the create/update payload
//! - [`stats`]: CPU, memory and disk usage snapshots
//! - [`dummy`]: Fixed sample data for tests and offline demos
//!
//! # Examples
//!
//! ```
//! use dashboard_protocol::{SystemStats, TaskInput};
//!
//! let input = TaskInput::new("Write release notes");
//! assert_eq!(input.title, "Write release notes");
//!
//! let stats = SystemStats::new(12.5, 140.0, -3.0);
//! assert_eq!(stats.memory_percent, 100.0);
//! assert_eq!(stats.disk_percent, 0.0);
//! ```

pub mod dummy;
pub mod stats;
pub mod task;

// Re-export primary types at crate root for convenience
pub use stats::SystemStats;
pub use task::{Task, TaskId, TaskInput};
