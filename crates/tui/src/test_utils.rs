//! Test utilities for the TUI crate.
//!
//! Buffer inspection helpers and a recording widget for exercising the
//! container and dashboard.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::buffer::Buffer;
use ratatui::layout::Size;
use ratatui::text::Text;

use crate::effect::Effect;
use crate::event::{Event, TaskEvent};
use crate::widget::{Widget, WidgetBase};

/// Converts a ratatui [`Buffer`] to a string, one line per row.
///
/// Trailing spaces are trimmed from each line for cleaner snapshots.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in buf.area.top()..buf.area.bottom() {
        for x in buf.area.left()..buf.area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        let trimmed = result.trim_end_matches(' ');
        result.truncate(trimmed.len());
        result.push('\n');
    }
    result
}

/// Converts rendered [`Text`] to a string, one line per text line.
#[must_use]
pub(crate) fn text_to_string(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| line.to_string().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shared record of the events a [`StubWidget`] received.
#[derive(Debug, Clone, Default)]
pub(crate) struct StubLog(Rc<RefCell<Vec<Event>>>);

impl StubLog {
    /// Returns the most recent event.
    pub(crate) fn last_event(&self) -> Option<Event> {
        self.0.borrow().last().cloned()
    }

    /// Returns the characters of every key press received, in order.
    pub(crate) fn keys(&self) -> String {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Key(key) => match key.code {
                    KeyCode::Char(c) => Some(c),
                    _ => Some('·'),
                },
                _ => None,
            })
            .collect()
    }
}

/// A widget that renders a fixed label and records every event.
#[derive(Debug)]
pub(crate) struct StubWidget {
    base: WidgetBase,
    label: &'static str,
    log: StubLog,
    resize_effect: bool,
}

impl StubWidget {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            base: WidgetBase::default(),
            label,
            log: StubLog::default(),
            resize_effect: false,
        }
    }

    /// Makes the widget answer every resize with an effect.
    pub(crate) fn with_resize_effect(mut self) -> Self {
        self.resize_effect = true;
        self
    }

    /// Returns a handle to the widget's event log.
    pub(crate) fn log(&self) -> StubLog {
        self.log.clone()
    }
}

impl Widget for StubWidget {
    fn handle_event(&mut self, event: &Event) -> Option<Effect> {
        self.log.0.borrow_mut().push(event.clone());
        match event {
            Event::Resize { .. } if self.resize_effect => Some(Effect::perform(async {
                Event::Tasks(TaskEvent::Loaded(Vec::new()))
            })),
            _ => None,
        }
    }

    fn render(&self) -> Text<'static> {
        Text::from(self.label)
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
