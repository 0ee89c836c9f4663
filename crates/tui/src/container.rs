//! The grid container: layout, focus and dispatch for a set of widgets.
//!
//! A [`Container`] owns an append-only list of widgets placed on a grid. It
//! is itself a [`Widget`], so it can be nested or driven directly.
//!
//! Dispatch policy:
//!
//! - `Resize` re-resolves the layout and is broadcast to every widget with
//!   the content size of its cell, in insertion order.
//! - Focus-cycle keys move the focus ring and produce no effect.
//! - Any other key goes only to the focused widget.
//! - Everything else (effect outcomes) is broadcast.

use std::cell::RefCell;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Widget as _, Wrap};
use tracing::debug;

use crate::effect::Effect;
use crate::error::UiError;
use crate::event::{Action, Event, focus_action};
use crate::focus::{FocusChange, FocusRing};
use crate::grid::{GridConfig, GridSpec, occupant};
use crate::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::style::{StyleCache, Theme, content_size};
use crate::text::buffer_to_text;
use crate::widget::Widget;

/// Whether the container has room to lay out its grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeState {
    /// At or above the minimum size.
    Normal,
    /// Below the minimum size; a placeholder is shown instead of the grid.
    #[default]
    TooSmall,
}

impl SizeState {
    /// Classifies a container size.
    #[must_use]
    pub fn for_size(size: Size) -> Self {
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            Self::TooSmall
        } else {
            Self::Normal
        }
    }
}

/// A widget together with its placement and resolved size.
#[derive(Debug)]
pub struct WidgetEntry {
    widget: Box<dyn Widget>,
    config: GridConfig,
    focused: bool,
    size: Size,
}

impl WidgetEntry {
    /// Returns the widget.
    #[must_use]
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// Returns the placement.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Returns `true` if this entry owns keyboard focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns the resolved outer size of the entry's cell.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Lays out widgets on a grid and routes events to them.
///
/// # Examples
///
/// ```
/// use dashboard_tui::{Container, Effect, Event, GridConfig, Widget, WidgetBase, event::key};
/// use crossterm::event::KeyCode;
/// use ratatui::{layout::Size, text::Text};
///
/// #[derive(Debug, Default)]
/// struct Blank(WidgetBase);
///
/// impl Widget for Blank {
///     fn handle_event(&mut self, _: &Event) -> Option<Effect> { None }
///     fn render(&self) -> Text<'static> { Text::default() }
///     fn set_size(&mut self, size: Size) { self.0.set_size(size) }
///     fn size(&self) -> Size { self.0.size() }
///     fn focus(&mut self) { self.0.focus() }
///     fn blur(&mut self) { self.0.blur() }
///     fn is_focused(&self) -> bool { self.0.is_focused() }
/// }
///
/// let mut container = Container::new(1, 3);
/// for col in 0..3 {
///     container.add_widget(Blank::default(), GridConfig::at(0, col)).unwrap();
/// }
///
/// for _ in 0..5 {
///     container.handle_event(&key(KeyCode::Tab));
/// }
/// assert_eq!(container.focused_index(), Some(2));
/// ```
#[derive(Debug)]
pub struct Container {
    grid: GridSpec,
    entries: Vec<WidgetEntry>,
    ring: FocusRing,
    styles: RefCell<StyleCache>,
    size: Size,
    state: SizeState,
    focused: bool,
}

impl Container {
    /// Creates an empty container on a `rows × cols` grid.
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self::with_grid(GridSpec::new(rows, cols))
    }

    /// Creates an empty container on `grid`.
    #[must_use]
    pub fn with_grid(grid: GridSpec) -> Self {
        Self {
            grid,
            entries: Vec::new(),
            ring: FocusRing::default(),
            styles: RefCell::new(StyleCache::default()),
            size: Size::default(),
            state: SizeState::for_size(Size::default()),
            focused: false,
        }
    }

    /// Replaces the theme used to decorate cells.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.set_theme(theme);
        self
    }

    /// Switches theme; cached cell styles are dropped.
    pub fn set_theme(&mut self, theme: Theme) {
        self.styles.get_mut().set_theme(theme);
    }

    /// Appends a widget at `config`, returning its index.
    ///
    /// The first widget added receives focus. The widget is sized for the
    /// container's current dimensions straight away.
    ///
    /// # Errors
    ///
    /// Rejects placements with an empty span, placements extending past the
    /// grid, and placements overlapping an existing widget. The widget is
    /// dropped in that case.
    pub fn add_widget(
        &mut self,
        widget: impl Widget + 'static,
        config: GridConfig,
    ) -> Result<usize, UiError> {
        self.grid
            .check_placement(&config, self.entries.iter().map(|entry| &entry.config))?;

        let mut widget: Box<dyn Widget> = Box::new(widget);
        let size = self.grid.resolve(self.size, &config);
        widget.set_size(content_size(size));

        let index = self.entries.len();
        self.entries.push(WidgetEntry {
            widget,
            config,
            focused: false,
            size,
        });
        debug!(index, row = config.row, col = config.col, "widget added");

        if let Some(change) = self.ring.push() {
            self.apply_focus(change);
        }
        Ok(index)
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WidgetEntry] {
        &self.entries
    }

    /// Returns the grid specification.
    #[must_use]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Returns the size state for the current dimensions.
    #[must_use]
    pub fn state(&self) -> SizeState {
        self.state
    }

    /// Returns the index of the focused entry.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.ring.current()
    }

    /// Returns the index of the widget covering cell `(row, col)`.
    #[must_use]
    pub fn occupant(&self, row: u16, col: u16) -> Option<usize> {
        occupant(self.entries.iter().map(|entry| &entry.config), row, col)
    }

    /// Moves focus to the next widget.
    pub fn focus_next(&mut self) {
        if let Some(change) = self.ring.advance_forward() {
            self.apply_focus(change);
        }
    }

    /// Moves focus to the previous widget.
    pub fn focus_prev(&mut self) {
        if let Some(change) = self.ring.advance_backward() {
            self.apply_focus(change);
        }
    }

    /// Moves focus to the widget at `index`, if there is one.
    pub fn focus_index(&mut self, index: usize) {
        if let Some(change) = self.ring.focus(index) {
            self.apply_focus(change);
        }
    }

    fn apply_focus(&mut self, change: FocusChange) {
        if let Some(entry) = change
            .previous
            .and_then(|previous| self.entries.get_mut(previous))
        {
            entry.focused = false;
            entry.widget.blur();
        }
        if let Some(entry) = self.entries.get_mut(change.next) {
            entry.focused = true;
            entry.widget.focus();
        }
        debug!(previous = ?change.previous, next = change.next, "focus moved");
    }

    /// Stores new dimensions and re-resolves every widget's size.
    fn apply_size(&mut self, size: Size) {
        let state = SizeState::for_size(size);
        if state != self.state {
            debug!(?state, width = size.width, height = size.height, "container size state changed");
        }
        self.size = size;
        self.state = state;

        for entry in &mut self.entries {
            entry.size = self.grid.resolve(size, &entry.config);
            entry.widget.set_size(content_size(entry.size));
        }
    }

    fn resize(&mut self, size: Size) -> Option<Effect> {
        self.apply_size(size);
        Effect::batch(self.entries.iter_mut().map(|entry| {
            let inner = entry.widget.size();
            entry.widget.handle_event(&Event::Resize {
                width: inner.width,
                height: inner.height,
            })
        }))
    }

    fn broadcast(&mut self, event: &Event) -> Option<Effect> {
        Effect::batch(
            self.entries
                .iter_mut()
                .map(|entry| entry.widget.handle_event(event)),
        )
    }

    /// Draws the container into `area` of `buf`.
    ///
    /// Layout follows the dimensions from the most recent resize; anything
    /// falling outside `area` is clipped.
    pub fn render_into(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let mut scratch = Buffer::empty(area);
        match self.state {
            SizeState::TooSmall => self.render_too_small(area, &mut scratch),
            SizeState::Normal => self.render_grid(area, &mut scratch),
        }
        buf.merge(&scratch);
    }

    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        let base = self.grid.base_cell(self.size);
        let mut styles = self.styles.borrow_mut();
        let mut drawn = vec![false; self.entries.len()];

        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let offset = self.grid.cell_offset(base, row, col);
                let origin = Position::new(
                    area.x.saturating_add(offset.x),
                    area.y.saturating_add(offset.y),
                );

                match self.occupant(row, col) {
                    Some(index) => {
                        // Spanning widgets are drawn once, from their origin cell.
                        if std::mem::replace(&mut drawn[index], true) {
                            continue;
                        }
                        let entry = &self.entries[index];
                        styles
                            .get_style(entry.size.width, entry.size.height, entry.focused)
                            .render(entry.widget.render(), origin, buf);
                    }
                    None => {
                        styles
                            .get_style(base.width, base.height, false)
                            .render(Text::default(), origin, buf);
                    }
                }
            }
        }
    }

    fn render_too_small(&self, area: Rect, buf: &mut Buffer) {
        let message = format!(
            "Window too small ({}×{})\nMinimum: {}×{} (w×h)",
            self.size.width, self.size.height, MIN_WIDTH, MIN_HEIGHT
        );
        let theme = *self.styles.borrow().theme();

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered = Rect {
            y: area.y.saturating_add(vertical_offset),
            height: area.height.saturating_sub(vertical_offset),
            ..area
        };

        Paragraph::new(message)
            .style(Style::default().fg(theme.secondary))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(centered, buf);
    }
}

impl Widget for Container {
    fn init(&mut self) -> Option<Effect> {
        Effect::batch(self.entries.iter_mut().map(|entry| entry.widget.init()))
    }

    fn handle_event(&mut self, event: &Event) -> Option<Effect> {
        match event {
            Event::Resize { width, height } => self.resize(Size::new(*width, *height)),
            Event::Key(_) => {
                match focus_action(event) {
                    Some(Action::FocusNext) => self.focus_next(),
                    Some(Action::FocusPrev) => self.focus_prev(),
                    _ => {
                        let index = self.ring.current()?;
                        return self.entries.get_mut(index)?.widget.handle_event(event);
                    }
                }
                None
            }
            Event::System(_) | Event::Tasks(_) => self.broadcast(event),
        }
    }

    fn render(&self) -> Text<'static> {
        let mut buf = Buffer::empty(Rect::new(0, 0, self.size.width, self.size.height));
        self.render_into(buf.area, &mut buf);
        buffer_to_text(&buf)
    }

    fn set_size(&mut self, size: Size) {
        self.apply_size(size);
    }

    fn size(&self) -> Size {
        self.size
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
