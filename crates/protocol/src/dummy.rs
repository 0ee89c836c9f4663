//! Fixed sample data for testing and demonstration.
//!
//! Timestamps are pinned so rendered output is reproducible.
//!
//! # Examples
//!
//! ```
//! use dashboard_protocol::dummy::sample_tasks;
//!
//! let tasks = sample_tasks();
//! assert_eq!(tasks.len(), 4);
//! assert_eq!(tasks.iter().filter(|t| t.is_completed()).count(), 1);
//! ```

use chrono::{DateTime, TimeZone, Utc};

use crate::task::Task;

/// Returns the timestamp every sample task is created at.
fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0)
        .single()
        .unwrap_or_default()
}

/// A builder for sample tasks.
struct TaskBuilder {
    id: &'static str,
    title: &'static str,
    description: Option<&'static str>,
    completed: bool,
}

impl TaskBuilder {
    fn new(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title,
            description: None,
            completed: false,
        }
    }

    fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    fn build(self) -> Task {
        let at = fixed_time();
        Task {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.map(str::to_string),
            created_at: at,
            updated_at: at,
            completed_at: self.completed.then_some(at),
        }
    }
}

/// Creates a small list of tasks in mixed states.
#[must_use]
pub fn sample_tasks() -> Vec<Task> {
    vec![
        TaskBuilder::new("1", "Review pull requests")
            .description("Two pending on the API crate")
            .build(),
        TaskBuilder::new("2", "Update dependencies").build(),
        TaskBuilder::new("3", "Write changelog")
            .description("Cover the layout rework")
            .completed()
            .build(),
        TaskBuilder::new("4", "Plan sprint").build(),
    ]
}
