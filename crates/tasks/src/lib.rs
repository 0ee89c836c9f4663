//! HTTP client for the remote task service.
//!
//! The service exposes a small JSON API:
//!
//! | Method   | Path                | Success |
//! |----------|---------------------|---------|
//! | `GET`    | `/api/v1/tasks`     | `200` with `[Task]` |
//! | `GET`    | `/api/v1/tasks/:id` | `200` with `Task` |
//! | `POST`   | `/api/v1/tasks`     | `201` with `Task` |
//! | `PUT`    | `/api/v1/tasks/:id` | `200` with `Task` |
//! | `DELETE` | `/api/v1/tasks/:id` | `204` |
//!
//! Any 2xx status is accepted; anything else surfaces as
//! [`Error::UnexpectedStatus`] carrying the response body.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use dashboard_tasks::TaskClient;
//!
//! # async fn example() -> dashboard_tasks::Result<()> {
//! let client = TaskClient::new("http://localhost:8080", Duration::from_secs(10))?;
//! for task in client.list_tasks().await? {
//!     println!("{}", task.summary_line());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::TaskClient;
pub use error::{Error, Result};
