//! Task records exchanged with the remote task service.
//!
//! The service speaks JSON over `/api/v1/tasks[/:id]`. This module defines the
//! record returned by the service and the payload sent when creating or
//! updating a task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a task by the remote service.
///
/// The service owns identifier generation, so the value is kept opaque.
pub type TaskId = String;

/// A task as returned by the remote task service.
///
/// # Examples
///
/// ```
/// use dashboard_protocol::Task;
///
/// let json = r#"{
///     "id": "42",
///     "title": "Water the plants",
///     "created_at": "2025-01-15T10:30:00Z",
///     "updated_at": "2025-01-15T10:30:00Z"
/// }"#;
///
/// let task: Task = serde_json::from_str(json).unwrap();
/// assert_eq!(task.id, "42");
/// assert!(task.description.is_none());
/// assert!(!task.is_completed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned by the service.
    pub id: TaskId,
    /// Short summary of the task.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last modified.
    pub updated_at: DateTime<Utc>,
    /// When the task was completed, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Returns `true` if the task carries a completion timestamp.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Formats the task as a single display line: `[✓] Title - Description`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_protocol::dummy::sample_tasks;
    ///
    /// let tasks = sample_tasks();
    /// assert_eq!(tasks[0].summary_line(), "[ ] Review pull requests - Two pending on the API crate");
    /// ```
    #[must_use]
    pub fn summary_line(&self) -> String {
        let status = if self.is_completed() { "[✓]" } else { "[ ]" };
        match self.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => format!("{status} {} - {description}", self.title),
            None => format!("{status} {}", self.title),
        }
    }
}

/// Payload for creating or updating a task.
///
/// `completed` is only sent when set, so a plain rename leaves the completion
/// state untouched on the server.
///
/// # Examples
///
/// ```
/// use dashboard_protocol::TaskInput;
///
/// let input = TaskInput::new("Call the plumber").with_description("Kitchen sink");
/// let json = serde_json::to_string(&input).unwrap();
/// assert_eq!(json, r#"{"title":"Call the plumber","description":"Kitchen sink"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Short summary of the task.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Requested completion state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskInput {
    /// Creates a payload with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requested completion state.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Builds the payload that flips a task's completion state.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_protocol::{TaskInput, dummy::sample_tasks};
    ///
    /// let task = &sample_tasks()[0];
    /// let input = TaskInput::toggled(task);
    /// assert_eq!(input.completed, Some(!task.is_completed()));
    /// ```
    #[must_use]
    pub fn toggled(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: Some(!task.is_completed()),
        }
    }
}
