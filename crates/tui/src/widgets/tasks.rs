//! Task list widget backed by the remote task service.
//!
//! Every mutation is followed by a fresh listing so the widget always shows
//! what the service holds. Network calls run as effects; their outcomes come
//! back as [`TaskEvent`]s.

use std::future::Future;

use crossterm::event::KeyCode;
use dashboard_protocol::{Task, TaskInput};
use dashboard_tasks::TaskClient;
use ratatui::layout::Size;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use tracing::{debug, warn};

use crate::effect::Effect;
use crate::event::{Event, TaskEvent};
use crate::style::Theme;
use crate::widget::{Widget, WidgetBase};

/// Title given to tasks created with `n`.
pub const NEW_TASK_TITLE: &str = "New task";

const HINT: &str = "↑/↓ select  space toggle  n new  d delete";

/// Lists tasks and lets the user toggle, create and delete them.
#[derive(Debug)]
pub struct TasksWidget {
    base: WidgetBase,
    theme: Theme,
    client: TaskClient,
    tasks: Vec<Task>,
    selected: usize,
    pending: usize,
    error: Option<String>,
}

impl TasksWidget {
    /// Creates an empty widget talking to `client`.
    #[must_use]
    pub fn new(client: TaskClient) -> Self {
        Self {
            base: WidgetBase::default(),
            theme: Theme::default(),
            client,
            tasks: Vec::new(),
            selected: 0,
            pending: 0,
            error: None,
        }
    }

    /// Sets the colors used for the title, selection and error line.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns the tasks from the most recent listing.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the selected task.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Returns `true` while any request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Returns the most recent request error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn fetch(&mut self) -> Effect {
        self.request("load tasks", async { Ok::<_, dashboard_tasks::Error>(()) })
    }

    /// Runs `call`, then re-lists on success.
    fn request<F, T>(&mut self, action: &'static str, call: F) -> Effect
    where
        F: Future<Output = dashboard_tasks::Result<T>> + Send + 'static,
        T: Send,
    {
        self.pending += 1;
        debug!(action, pending = self.pending, "task request");
        let client = self.client.clone();
        Effect::perform(async move {
            let outcome = call.await.map(drop);
            let result = match outcome {
                Ok(()) => client.list_tasks().await,
                Err(e) => Err(e),
            };
            Event::Tasks(match result {
                Ok(tasks) => TaskEvent::Loaded(tasks),
                Err(e) => TaskEvent::Failed(format!("{action}: {e}")),
            })
        })
    }

    fn toggle_selected(&mut self) -> Option<Effect> {
        let task = self.selected_task()?;
        let id = task.id.clone();
        let input = TaskInput::toggled(task);
        let client = self.client.clone();
        Some(self.request("update task", async move {
            client.update_task(&id, &input).await
        }))
    }

    fn delete_selected(&mut self) -> Option<Effect> {
        let id = self.selected_task()?.id.clone();
        let client = self.client.clone();
        Some(self.request("delete task", async move {
            client.delete_task(&id).await
        }))
    }

    fn create(&mut self) -> Effect {
        let client = self.client.clone();
        self.request("create task", async move {
            client.create_task(&TaskInput::new(NEW_TASK_TITLE)).await
        })
    }

    fn on_key(&mut self, code: KeyCode) -> Option<Effect> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.tasks.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('n') => Some(self.create()),
            KeyCode::Char('r') => Some(self.fetch()),
            _ => None,
        }
    }

    fn on_task_event(&mut self, event: &TaskEvent) {
        self.pending = self.pending.saturating_sub(1);
        match event {
            TaskEvent::Loaded(tasks) => {
                self.tasks.clone_from(tasks);
                self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
                self.error = None;
            }
            TaskEvent::Failed(message) => {
                warn!(%message, "task request failed");
                self.error = Some(message.clone());
            }
        }
    }

    /// Number of task rows that fit below the title, error and hint lines.
    fn visible_rows(&self) -> usize {
        let mut reserved = 2;
        if self.error.is_some() {
            reserved += 1;
        }
        if self.base.is_focused() {
            reserved += 2;
        }
        usize::from(self.base.size().height)
            .saturating_sub(reserved)
            .max(1)
    }

    fn task_line(&self, index: usize, task: &Task) -> Line<'static> {
        let selected = index == self.selected && self.base.is_focused();
        let marker = if selected { "> " } else { "  " };
        let mut style = Style::default();
        if task.is_completed() {
            style = style.fg(self.theme.subtle);
        }
        if selected {
            style = style.fg(self.theme.primary).add_modifier(Modifier::BOLD);
        }
        Line::from(Span::styled(format!("{marker}{}", task.summary_line()), style))
    }
}

impl Widget for TasksWidget {
    fn init(&mut self) -> Option<Effect> {
        Some(self.fetch())
    }

    fn handle_event(&mut self, event: &Event) -> Option<Effect> {
        match event {
            Event::Tasks(task_event) => {
                self.on_task_event(task_event);
                None
            }
            Event::Key(key) if self.base.is_focused() => self.on_key(key.code),
            _ => None,
        }
    }

    fn render(&self) -> Text<'static> {
        let subtle = Style::default().fg(self.theme.subtle);
        let mut lines = vec![
            Line::from(Span::styled(
                "Tasks",
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(self.theme.error),
            )));
        }

        if self.tasks.is_empty() {
            let message = if self.is_loading() {
                "Loading…"
            } else {
                "No tasks. Press n to create one."
            };
            lines.push(Line::from(Span::styled(message, subtle)));
        } else {
            let visible = self.visible_rows();
            let start = (self.selected + 1).saturating_sub(visible);
            lines.extend(
                self.tasks
                    .iter()
                    .enumerate()
                    .skip(start)
                    .take(visible)
                    .map(|(index, task)| self.task_line(index, task)),
            );
        }

        if self.base.is_focused() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(HINT, subtle)));
        }

        Text::from(lines)
    }

    fn set_size(&mut self, size: Size) {
        self.base.set_size(size);
    }

    fn size(&self) -> Size {
        self.base.size()
    }

    fn focus(&mut self) {
        self.base.focus();
    }

    fn blur(&mut self) {
        self.base.blur();
    }

    fn is_focused(&self) -> bool {
        self.base.is_focused()
    }
}
