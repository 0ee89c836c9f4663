//! The dashboard shell: header, grid container, status bar and help overlay.
//!
//! The shell owns the global key bindings and hands everything else to its
//! [`Container`]. It also decides how much of the terminal the container
//! gets: tall terminals show a header and status bar around the grid, short
//! ones give the grid the whole area.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget as _};
use tracing::debug;

use dashboard_tasks::TaskClient;

use crate::container::Container;
use crate::effect::Effect;
use crate::error::UiError;
use crate::event::{Action, Event, global_action};
use crate::grid::GridConfig;
use crate::layout::{HEADER_HEIGHT, MIN_HEIGHT_WITH_CHROME, MIN_WIDTH, STATUS_BAR_HEIGHT};
use crate::style::Theme;
use crate::text::buffer_to_text;
use crate::widget::Widget;
use crate::widgets::{SystemWidget, TasksWidget, render_help_overlay, render_status_bar};

/// Rows of the standard grid.
pub const ROWS: u16 = 2;

/// Columns of the standard grid.
pub const COLS: u16 = 2;

/// Returns `true` if a terminal of `height` rows has room for the header and
/// status bar.
#[must_use]
pub fn chrome_visible(height: u16) -> bool {
    height >= MIN_HEIGHT_WITH_CHROME
}

/// Areas of the dashboard frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Areas {
    header: Option<Rect>,
    content: Rect,
    status: Option<Rect>,
}

impl Areas {
    fn split(area: Rect) -> Self {
        if !chrome_visible(area.height) {
            return Self {
                header: None,
                content: area,
                status: None,
            };
        }

        let [header, content, status] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        Self {
            header: Some(header),
            content,
            status: Some(status),
        }
    }
}

/// The top-level widget driven by the [`App`](crate::App) run loop.
#[derive(Debug)]
pub struct Dashboard {
    container: Container,
    theme: Theme,
    help_visible: bool,
    size: Size,
    focused: bool,
}

impl Dashboard {
    /// Wraps `container` in the dashboard chrome.
    #[must_use]
    pub fn new(container: Container) -> Self {
        Self {
            container,
            theme: Theme::default(),
            help_visible: false,
            size: Size::default(),
            focused: true,
        }
    }

    /// Builds the standard layout: system gauges across the top row and the
    /// task list across the bottom row.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement does not fit the grid.
    pub fn standard(client: TaskClient, interval: Duration) -> Result<Self, UiError> {
        let theme = Theme::default();
        let mut container = Container::new(ROWS, COLS).with_theme(theme);
        container.add_widget(
            SystemWidget::new(interval).with_theme(theme),
            GridConfig::at(0, 0).span(1, COLS).min_size(MIN_WIDTH, 0),
        )?;
        container.add_widget(
            TasksWidget::new(client).with_theme(theme),
            GridConfig::at(1, 0).span(1, COLS),
        )?;
        Ok(Self::new(container).with_theme(theme))
    }

    /// Replaces the theme of the chrome and the grid.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self.container.set_theme(theme);
        self
    }

    /// Returns the grid container.
    #[must_use]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Returns `true` while the help overlay is shown.
    #[must_use]
    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    /// Returns the size handed to the container for a terminal of `size`.
    #[must_use]
    pub fn content_size(size: Size) -> Size {
        if chrome_visible(size.height) {
            Size::new(
                size.width,
                size.height - HEADER_HEIGHT - STATUS_BAR_HEIGHT,
            )
        } else {
            size
        }
    }

    fn resize(&mut self, size: Size) -> Option<Effect> {
        self.size = size;
        let content = Self::content_size(size);
        self.container.handle_event(&Event::Resize {
            width: content.width,
            height: content.height,
        })
    }

    fn on_key(&mut self, event: &Event, action: Option<Action>) -> Option<Effect> {
        if action == Some(Action::Quit) {
            return Some(Effect::Quit);
        }

        // While help is shown, every other key only closes it.
        if self.help_visible {
            self.help_visible = false;
            debug!("help dismissed");
            return None;
        }

        if action == Some(Action::ToggleHelp) {
            self.help_visible = true;
            debug!("help shown");
            return None;
        }

        self.container.handle_event(event)
    }

    /// Draws the whole dashboard into `area` of `buf`.
    pub fn render_into(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let areas = Areas::split(area);

        if let Some(header) = areas.header {
            self.render_header(header, buf);
        }

        self.container.render_into(areas.content, buf);

        if let Some(status) = areas.status {
            let focus = self
                .container
                .focused_index()
                .map(|index| (index, self.container.entries().len()));
            render_status_bar(&self.theme, focus, status, buf);
        }

        if self.help_visible {
            render_help_overlay(&self.theme, area, buf);
        }
    }

    /// Renders the header bar with title and help cue.
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border));

        let inner = block.inner(area);
        block.render(area, buf);

        // "Press ? for help" is 16 columns, plus one of padding.
        let [title_area, help_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).areas(inner);

        Paragraph::new(Line::from(vec![
            Span::styled(
                "dashboard",
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::raw("System & Tasks"),
        ]))
        .render(title_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(self.theme.subtle)),
            Span::styled("?", Style::default().fg(self.theme.secondary)),
            Span::styled(" for help", Style::default().fg(self.theme.subtle)),
        ]))
        .alignment(Alignment::Right)
        .render(help_area, buf);
    }
}

impl Widget for Dashboard {
    fn init(&mut self) -> Option<Effect> {
        self.container.init()
    }

    fn handle_event(&mut self, event: &Event) -> Option<Effect> {
        match event {
            Event::Resize { width, height } => self.resize(Size::new(*width, *height)),
            Event::Key(key) => self.on_key(event, global_action(key)),
            Event::System(_) | Event::Tasks(_) => self.container.handle_event(event),
        }
    }

    fn render(&self) -> Text<'static> {
        let mut buf = Buffer::empty(Rect::new(0, 0, self.size.width, self.size.height));
        self.render_into(buf.area, &mut buf);
        buffer_to_text(&buf)
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.container.set_size(Self::content_size(size));
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

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::container::SizeState;
    use crate::event::{SystemEvent, key};
    use crate::test_utils::{StubLog, StubWidget, buffer_to_string};

    fn resize(width: u16, height: u16) -> Event {
        Event::Resize { width, height }
    }

    fn dashboard() -> (Dashboard, Vec<StubLog>) {
        let mut container = Container::new(ROWS, COLS);
        let top = StubWidget::new("top");
        let bottom = StubWidget::new("bottom");
        let logs = vec![top.log(), bottom.log()];
        container
            .add_widget(top, GridConfig::at(0, 0).span(1, 2))
            .unwrap();
        container
            .add_widget(bottom, GridConfig::at(1, 0).span(1, 2))
            .unwrap();
        (Dashboard::new(container), logs)
    }

    fn draw(dashboard: &Dashboard, width: u16, height: u16) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        dashboard.render_into(buf.area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn quit_keys_produce_quit_effect() {
        let (mut dashboard, _) = dashboard();
        assert!(dashboard
            .handle_event(&key(KeyCode::Char('q')))
            .is_some_and(|e| e.is_quit()));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(dashboard.handle_event(&ctrl_c).is_some_and(|e| e.is_quit()));
    }

    #[test]
    fn quit_works_with_help_visible() {
        let (mut dashboard, _) = dashboard();
        dashboard.handle_event(&key(KeyCode::Char('?')));
        assert!(dashboard.is_help_visible());
        assert!(dashboard
            .handle_event(&key(KeyCode::Char('q')))
            .is_some_and(|e| e.is_quit()));
    }

    #[test]
    fn help_toggles_and_swallows_keys() {
        let (mut dashboard, logs) = dashboard();

        dashboard.handle_event(&key(KeyCode::Char('?')));
        assert!(dashboard.is_help_visible());

        // Dismisses help without reaching the widget or moving focus.
        dashboard.handle_event(&key(KeyCode::Tab));
        assert!(!dashboard.is_help_visible());
        assert_eq!(dashboard.container().focused_index(), Some(0));
        assert_eq!(logs[0].keys(), "");

        dashboard.handle_event(&key(KeyCode::Char('?')));
        dashboard.handle_event(&key(KeyCode::Char('?')));
        assert!(!dashboard.is_help_visible());
    }

    #[test]
    fn tab_cycles_focus_through_container() {
        let (mut dashboard, _) = dashboard();
        dashboard.handle_event(&key(KeyCode::Tab));
        assert_eq!(dashboard.container().focused_index(), Some(1));
        dashboard.handle_event(&key(KeyCode::BackTab));
        assert_eq!(dashboard.container().focused_index(), Some(0));
    }

    #[test]
    fn other_keys_reach_focused_widget() {
        let (mut dashboard, logs) = dashboard();
        dashboard.handle_event(&key(KeyCode::Char('j')));
        assert_eq!(logs[0].keys(), "j");
        assert_eq!(logs[1].keys(), "");
    }

    #[test]
    fn effect_outcomes_reach_every_widget() {
        let (mut dashboard, logs) = dashboard();
        let event = Event::System(SystemEvent::Failed {
            generation: 0,
            message: "x".to_string(),
        });
        dashboard.handle_event(&event);
        for log in &logs {
            assert_eq!(log.last_event(), Some(event.clone()));
        }
    }

    #[test]
    fn content_size_accounts_for_chrome() {
        assert_eq!(Dashboard::content_size(Size::new(80, 24)), Size::new(80, 20));
        assert_eq!(
            Dashboard::content_size(Size::new(80, MIN_HEIGHT_WITH_CHROME)),
            Size::new(80, 10)
        );
        assert_eq!(Dashboard::content_size(Size::new(80, 13)), Size::new(80, 13));
        assert_eq!(Dashboard::content_size(Size::new(0, 0)), Size::new(0, 0));
    }

    #[test]
    fn resize_hands_content_area_to_container() {
        let (mut dashboard, _) = dashboard();
        dashboard.handle_event(&resize(80, 24));
        assert_eq!(dashboard.size(), Size::new(80, 24));
        assert_eq!(dashboard.container().size(), Size::new(80, 20));
        assert_eq!(dashboard.container().state(), SizeState::Normal);
    }

    #[test]
    fn full_frame_has_header_grid_and_status_bar() {
        let (mut dashboard, _) = dashboard();
        dashboard.handle_event(&resize(80, 24));

        let out = draw(&dashboard, 80, 24);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 24);
        assert!(lines[1].contains("dashboard - System & Tasks"));
        assert!(lines[1].contains("Press ? for help"));
        assert!(lines[3].starts_with("╔"));
        assert!(lines[4].contains("top"));
        assert!(lines[23].starts_with("q Quit"));
        assert!(lines[23].ends_with("Focus 1/2"));
    }

    #[test]
    fn compact_frame_drops_chrome() {
        let (mut dashboard, _) = dashboard();
        dashboard.handle_event(&resize(80, 12));

        let out = draw(&dashboard, 80, 12);
        assert!(!out.contains("Press ? for help"));
        assert!(!out.contains("q Quit"));
        assert!(out.starts_with("╔"));
    }

    #[test]
    fn tiny_frame_shows_too_small_message() {
        let (mut dashboard, _) = dashboard();
        dashboard.handle_event(&resize(30, 8));
        assert!(draw(&dashboard, 30, 8).contains("Window too small (30×8)"));
    }

    #[test]
    fn help_overlay_is_drawn_on_top() {
        let (mut dashboard, _) = dashboard();
        dashboard.handle_event(&resize(80, 40));
        dashboard.handle_event(&key(KeyCode::Char('?')));

        let out = draw(&dashboard, 80, 40);
        assert!(out.contains("Help"));
        assert!(out.contains("Toggle help"));
    }

    #[test]
    fn render_never_panics_at_degenerate_sizes() {
        let (mut dashboard, _) = dashboard();
        for width in [0, 1, 39, 40, 41] {
            for height in [0, 1, 9, 10, 11, 13, 14] {
                dashboard.handle_event(&resize(width, height));
                let text = dashboard.render();
                assert_eq!(text.lines.len(), usize::from(height));
            }
        }
    }

    #[test]
    fn standard_layout_places_two_widgets() {
        let client = TaskClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let mut dashboard = Dashboard::standard(client, Duration::from_secs(2)).unwrap();
        dashboard.handle_event(&resize(80, 24));

        let container = dashboard.container();
        assert_eq!(container.entries().len(), 2);
        assert_eq!(container.occupant(0, 1), Some(0));
        assert_eq!(container.occupant(1, 1), Some(1));
        assert!(container.entries()[0].size().width >= MIN_WIDTH);

        let out = draw(&dashboard, 80, 24);
        assert!(out.contains("System Information"));
        assert!(out.contains("Tasks"));
    }
}
