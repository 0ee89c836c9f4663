//! Status bar rendering widget.
//!
//! A single row of key hints on the left and the focus position on the
//! right, drawn without a border.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::style::Theme;
use crate::widgets::help::status_bar_bindings;

/// Renders the status bar.
///
/// `focus` is the focused widget's index and the widget count, if any widget
/// is focused.
///
/// # Layout
///
/// ```text
/// q Quit  Tab Next widget  ? Toggle help  r Refresh          Focus 1/2
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use dashboard_tui::{Theme, widgets::render_status_bar};
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(&Theme::default(), Some((0, 2)), area, &mut buf);
/// ```
pub fn render_status_bar(theme: &Theme, focus: Option<(usize, usize)>, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(theme.secondary);
    let text_style = Style::default().fg(theme.subtle);

    let mut spans = Vec::new();
    for binding in status_bar_bindings() {
        spans.push(Span::styled(binding.keys, key_style));
        spans.push(Span::styled(format!(" {}  ", binding.description), text_style));
    }

    let focus_label = focus
        .map(|(index, count)| format!("Focus {}/{count} ", index + 1))
        .unwrap_or_default();
    let label_width = u16::try_from(focus_label.chars().count()).unwrap_or(u16::MAX);

    let [hints_area, focus_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(label_width)]).areas(area);

    Paragraph::new(Line::from(spans)).render(hints_area, buf);
    Paragraph::new(Line::from(Span::styled(
        focus_label,
        Style::default().fg(theme.primary),
    )))
    .alignment(Alignment::Right)
    .render(focus_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn shows_hints_and_focus() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);

        render_status_bar(&Theme::default(), Some((1, 2)), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.starts_with("q Quit  Tab Next widget  ? Toggle help  r Refresh"));
        assert!(content.trim_end().ends_with("Focus 2/2"));
    }

    #[test]
    fn no_focus_label_without_widgets() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);

        render_status_bar(&Theme::default(), None, area, &mut buf);

        assert!(!buffer_to_string(&buf).contains("Focus"));
    }

    #[test]
    fn narrow_area_does_not_panic() {
        for width in [0, 1, 5] {
            let area = Rect::new(0, 0, width, 1);
            let mut buf = Buffer::empty(area);
            render_status_bar(&Theme::default(), Some((0, 1)), area, &mut buf);
        }
    }
}
