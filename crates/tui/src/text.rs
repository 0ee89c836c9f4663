//! Conversions between rendered buffers and [`Text`].

use ratatui::buffer::Buffer;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

/// Flattens a buffer into styled text, one line per row.
///
/// Runs of cells sharing a style become a single span, so the text renders
/// back to the same cells.
#[must_use]
pub fn buffer_to_text(buf: &Buffer) -> Text<'static> {
    let area = buf.area;
    let lines: Vec<Line<'static>> = (area.top()..area.bottom())
        .map(|y| {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_style: Option<Style> = None;

            for x in area.left()..area.right() {
                let Some(cell) = buf.cell((x, y)) else {
                    continue;
                };
                let style = cell.style();
                if run_style != Some(style) {
                    if let Some(previous) = run_style {
                        spans.push(Span::styled(std::mem::take(&mut run), previous));
                    }
                    run_style = Some(style);
                }
                run.push_str(cell.symbol());
            }

            if let Some(style) = run_style {
                spans.push(Span::styled(run, style));
            }
            Line::from(spans)
        })
        .collect();

    Text::from(lines)
}
