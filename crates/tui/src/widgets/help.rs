//! Key binding table and the help overlay that displays it.
//!
//! The status bar and the help overlay both read from [`SECTIONS`], so the
//! two never disagree about what a key does.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::style::Theme;

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 38;

/// Width of the key column inside the overlay.
const KEY_COLUMN: usize = 13;

/// A key and what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    /// Key label as shown to the user.
    pub keys: &'static str,
    /// Short description of the action.
    pub description: &'static str,
    /// Whether the status bar shows this binding.
    pub in_status_bar: bool,
}

impl KeyBinding {
    const fn new(keys: &'static str, description: &'static str) -> Self {
        Self {
            keys,
            description,
            in_status_bar: false,
        }
    }

    const fn pinned(keys: &'static str, description: &'static str) -> Self {
        Self {
            keys,
            description,
            in_status_bar: true,
        }
    }
}

/// Bindings grouped under a heading.
#[derive(Debug, Clone, Copy)]
pub struct BindingSection {
    /// Section heading.
    pub title: &'static str,
    /// Bindings in display order.
    pub bindings: &'static [KeyBinding],
}

/// Every key binding of the dashboard.
pub const SECTIONS: &[BindingSection] = &[
    BindingSection {
        title: "Global",
        bindings: &[
            KeyBinding::pinned("q", "Quit"),
            KeyBinding::new("Ctrl+C", "Quit"),
            KeyBinding::pinned("Tab", "Next widget"),
            KeyBinding::new("Shift+Tab", "Previous widget"),
            KeyBinding::pinned("?", "Toggle help"),
        ],
    },
    BindingSection {
        title: "Tasks",
        bindings: &[
            KeyBinding::new("↑/k ↓/j", "Select task"),
            KeyBinding::new("Space", "Toggle done"),
            KeyBinding::new("n", "New task"),
            KeyBinding::new("d", "Delete task"),
            KeyBinding::pinned("r", "Refresh"),
        ],
    },
    BindingSection {
        title: "System",
        bindings: &[KeyBinding::new("r", "Sample now")],
    },
];

/// Returns the bindings shown in the status bar, in table order.
pub fn status_bar_bindings() -> impl Iterator<Item = &'static KeyBinding> {
    SECTIONS
        .iter()
        .flat_map(|section| section.bindings)
        .filter(|binding| binding.in_status_bar)
}

/// Renders a centered help overlay listing every key binding.
///
/// The area behind the panel is cleared first. The panel shrinks to fit
/// small areas.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use dashboard_tui::{Theme, widgets::render_help_overlay};
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(&Theme::default(), area, &mut buf);
/// ```
pub fn render_help_overlay(theme: &Theme, area: Rect, buf: &mut Buffer) {
    let lines = build_help_lines(theme);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup_area = centered_rect(HELP_WIDTH, height, area);

    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.secondary));

    Paragraph::new(lines)
        .block(help_block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

/// Builds the lines of help content.
fn build_help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(theme.secondary);
    let hint_style = Style::default()
        .fg(theme.subtle)
        .add_modifier(Modifier::ITALIC);

    let mut lines = Vec::new();
    for section in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", section.title),
            header_style,
        )));
        for binding in section.bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<KEY_COLUMN$}", binding.keys), key_style),
                Span::raw(binding.description),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", hint_style)));
    lines
}

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
