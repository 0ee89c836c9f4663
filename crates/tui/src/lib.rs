//! Terminal UI for the dashboard.
//!
//! This crate provides the widget composition and layout engine behind the
//! dashboard, plus the concrete widgets and the Ratatui run loop.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`widget`]: the [`Widget`] contract every dashboard unit satisfies
//! - [`effect`]: deferred work returned by widgets
//! - [`grid`]: grid placement and size resolution
//! - [`focus`]: the cyclic focus ring
//! - [`style`]: themed cell frames and their cache
//! - [`container`]: the grid container that lays out and routes events
//! - [`dashboard`]: header, status bar and help around the container
//! - [`widgets`]: system gauges, task list, help and status bar
//! - [`runtime`]: effect execution on tokio
//! - [`app`]: main application struct and run loop
//! - [`terminal`]: terminal setup, teardown, and panic handling
//! - [`event`]: events, key mappings and terminal polling
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use dashboard_tasks::TaskClient;
//! use dashboard_tui::{App, Dashboard, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let client = TaskClient::new("http://localhost:8080", Duration::from_secs(10))?;
//!     let mut app = App::new(Dashboard::standard(client, Duration::from_secs(2))?);
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod container;
pub mod dashboard;
pub mod effect;
pub mod error;
pub mod event;
pub mod focus;
pub mod grid;
pub mod layout;
pub mod runtime;
pub mod style;
pub mod terminal;
pub mod text;
pub mod widget;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use container::{Container, SizeState, WidgetEntry};
pub use dashboard::Dashboard;
pub use effect::Effect;
pub use error::UiError;
pub use event::{Action, Event, SystemEvent, TaskEvent};
pub use focus::{FocusChange, FocusRing};
pub use grid::{GridConfig, GridSpec};
pub use runtime::EffectRunner;
pub use style::{CellStyle, StyleCache, StyleKey, Theme};
pub use widget::{Widget, WidgetBase, checked_size};
