//! Events, global key bindings and terminal polling.
//!
//! Everything a widget can react to is an [`Event`]: terminal input and the
//! outcomes of effects. Effect outcomes are broadcast, so each carries enough
//! to tell whose request it answers.

use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dashboard_protocol::{SystemStats, Task};

/// Default poll timeout for terminal events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Input delivered to widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The space available to the receiver changed.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// A system gauge sampling outcome.
    System(SystemEvent),
    /// A task service outcome.
    Tasks(TaskEvent),
}

/// Outcomes of system sampling.
///
/// The generation identifies the sampling chain that produced the result;
/// results from superseded chains are dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemEvent {
    /// A sample was taken.
    Sampled {
        /// Chain that requested the sample.
        generation: u64,
        /// The sampled values.
        stats: SystemStats,
    },
    /// Sampling failed.
    Failed {
        /// Chain that requested the sample.
        generation: u64,
        /// Human-readable reason.
        message: String,
    },
}

/// Outcomes of task service calls.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// The task list was (re)loaded.
    Loaded(Vec<Task>),
    /// A call failed.
    Failed(String),
}

/// Actions bound to keys regardless of focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Exit the application.
    Quit,
    /// Show or hide the help overlay.
    ToggleHelp,
    /// Move focus to the next widget.
    FocusNext,
    /// Move focus to the previous widget.
    FocusPrev,
}

/// Maps a key to a global action.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `q`, `Ctrl+C` | Quit |
/// | `?` | Toggle help |
/// | `Tab` | Focus next widget |
/// | `Shift+Tab` | Focus previous widget |
#[must_use]
pub fn global_action(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        _ => None,
    }
}

/// Returns the focus direction for focus-cycle keys.
#[must_use]
pub fn focus_action(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => global_action(key)
            .filter(|action| matches!(action, Action::FocusNext | Action::FocusPrev)),
        _ => None,
    }
}

/// Converts a terminal event into a dashboard event.
///
/// Only key presses and resizes are kept; key releases and repeats reported
/// by some terminals are dropped so each press is handled once.
#[must_use]
pub fn from_terminal(event: &event::Event) -> Option<Event> {
    match event {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(*key)),
        event::Event::Resize(width, height) => Some(Event::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Polls for a terminal event with the default timeout.
///
/// Returns `Ok(None)` if the timeout expires or the event is not relevant.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(from_terminal(&event::read()?))
    } else {
        Ok(None)
    }
}

/// Builds a plain key press event.
#[must_use]
pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}
