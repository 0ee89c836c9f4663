//! The contract every dashboard widget satisfies.
//!
//! A widget owns its private state and is mutated in place by the container
//! that holds it. Background work is never done inline: a widget describes it
//! as an [`Effect`] and receives the outcome later as an ordinary [`Event`].
//!
//! # Examples
//!
//! ```
//! use dashboard_tui::{Effect, Event, Widget, WidgetBase};
//! use ratatui::layout::Size;
//! use ratatui::text::Text;
//!
//! #[derive(Debug, Default)]
//! struct Clock {
//!     base: WidgetBase,
//!     ticks: u32,
//! }
//!
//! impl Widget for Clock {
//!     fn handle_event(&mut self, event: &Event) -> Option<Effect> {
//!         if let Event::Key(_) = event {
//!             self.ticks += 1;
//!         }
//!         None
//!     }
//!
//!     fn render(&self) -> Text<'static> {
//!         Text::from(format!("ticks: {}", self.ticks))
//!     }
//!
//!     fn set_size(&mut self, size: Size) { self.base.set_size(size) }
//!     fn size(&self) -> Size { self.base.size() }
//!     fn focus(&mut self) { self.base.focus() }
//!     fn blur(&mut self) { self.base.blur() }
//!     fn is_focused(&self) -> bool { self.base.is_focused() }
//! }
//!
//! let mut clock = Clock::default();
//! clock.try_set_size(20, 3).unwrap();
//! assert_eq!(clock.size(), Size::new(20, 3));
//! assert!(clock.try_set_size(-1, 3).is_err());
//! ```

use std::fmt;

use ratatui::layout::Size;
use ratatui::text::Text;

use crate::effect::Effect;
use crate::error::UiError;
use crate::event::Event;

/// A focusable, resizable unit of the dashboard.
pub trait Widget: fmt::Debug {
    /// Called once before the first event; may request background work.
    fn init(&mut self) -> Option<Effect> {
        None
    }

    /// Consumes an event, updating state in place.
    ///
    /// Key events only reach the focused widget; everything else is
    /// broadcast, so implementations must tolerate events meant for others.
    fn handle_event(&mut self, event: &Event) -> Option<Effect>;

    /// Renders the current state at the current size.
    ///
    /// Must not panic for any size, including `0×0`.
    fn render(&self) -> Text<'static>;

    /// Replaces the stored dimensions.
    fn set_size(&mut self, size: Size);

    /// Returns the stored dimensions.
    fn size(&self) -> Size;

    /// Marks the widget as owning keyboard focus.
    fn focus(&mut self);

    /// Clears keyboard focus.
    fn blur(&mut self);

    /// Reports whether the widget owns keyboard focus.
    fn is_focused(&self) -> bool;

    /// Sets the size from signed values, rejecting anything that does not fit
    /// a terminal cell grid.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidDimension`] for negative or oversized values;
    /// the stored size is left untouched.
    fn try_set_size(&mut self, width: i64, height: i64) -> Result<(), UiError> {
        let size = checked_size(width, height)?;
        self.set_size(size);
        Ok(())
    }
}

/// Converts signed dimensions into a [`Size`].
///
/// # Errors
///
/// Returns [`UiError::InvalidDimension`] if either value is negative or
/// exceeds `u16::MAX`.
pub fn checked_size(width: i64, height: i64) -> Result<Size, UiError> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok(Size::new(w, h)),
        _ => Err(UiError::InvalidDimension { width, height }),
    }
}

/// Size and focus bookkeeping shared by concrete widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetBase {
    size: Size,
    focused: bool,
}

impl WidgetBase {
    /// Returns the stored size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Replaces the stored size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Sets the focus flag.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Clears the focus flag.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Returns the focus flag.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}
