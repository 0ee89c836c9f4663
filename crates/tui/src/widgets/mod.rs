//! Concrete widgets and the chrome drawn around the grid.
//!
//! # Modules
//!
//! - [`system`]: CPU, memory and disk gauges sampled in the background
//! - [`tasks`]: task list backed by the remote task service
//! - [`help`]: key-binding table and the help overlay
//! - [`status_bar`]: footer with key hints and focus position
//!
//! The gauge and task widgets implement [`Widget`](crate::Widget) and live in
//! grid cells. Help and status bar are plain rendering functions called by
//! the [`Dashboard`](crate::Dashboard) shell.

pub mod help;
pub mod status_bar;
pub mod system;
pub mod tasks;

pub use help::{KeyBinding, SECTIONS, render_help_overlay};
pub use status_bar::render_status_bar;
pub use system::SystemWidget;
pub use tasks::TasksWidget;
