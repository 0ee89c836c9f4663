//! Cell decoration and its cache.
//!
//! Every grid cell is drawn inside a bordered, padded frame whose look
//! depends only on the cell's size and focus state. [`StyleCache`] memoizes
//! those frames per `(width, height, focused)` for the current [`Theme`].

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget as _};
use tracing::trace;

/// Columns taken by the border and horizontal padding of a cell.
pub const CHROME_WIDTH: u16 = 4;

/// Rows taken by the border of a cell.
pub const CHROME_HEIGHT: u16 = 2;

/// Default number of cached styles before the cache is cleared.
pub const DEFAULT_CAPACITY: usize = 256;

/// Returns the content size left inside a decorated cell of size `outer`.
#[must_use]
pub fn content_size(outer: Size) -> Size {
    Size::new(
        outer.width.saturating_sub(CHROME_WIDTH),
        outer.height.saturating_sub(CHROME_HEIGHT),
    )
}

/// Colors used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Focus highlight and titles.
    pub primary: Color,
    /// Secondary accents such as key hints.
    pub secondary: Color,
    /// Unfocused borders and muted text.
    pub subtle: Color,
    /// Header and status bar borders.
    pub border: Color,
    /// Error text.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(0x21, 0x96, 0xF3),
            secondary: Color::Rgb(0xFF, 0xB7, 0x4D),
            subtle: Color::Rgb(0x4A, 0x4A, 0x4A),
            border: Color::Rgb(0x3C, 0x3C, 0x3C),
            error: Color::Rgb(0xE5, 0x73, 0x73),
        }
    }
}

/// Identifies a cached cell style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleKey {
    /// Outer width of the cell.
    pub width: u16,
    /// Outer height of the cell.
    pub height: u16,
    /// Whether the cell holds the focused widget.
    pub focused: bool,
}

/// A ready-to-draw cell frame of a fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    key: StyleKey,
    block: Block<'static>,
}

impl CellStyle {
    fn new(key: StyleKey, theme: &Theme) -> Self {
        let block = if key.focused {
            Block::bordered()
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(theme.primary))
        } else {
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.subtle))
        };

        Self {
            key,
            block: block.padding(Padding::horizontal(1)),
        }
    }

    /// Returns the key this style was built for.
    #[must_use]
    pub fn key(&self) -> StyleKey {
        self.key
    }

    /// Draws `content` framed by this style with its top-left at `origin`.
    ///
    /// Anything outside the buffer is cut off, borders included, so an
    /// overflowing cell stays open on the clipped sides. A cell entirely
    /// outside draws nothing.
    pub fn render(&self, content: Text<'static>, origin: Position, buf: &mut Buffer) {
        let full = Rect::new(origin.x, origin.y, self.key.width, self.key.height);
        let visible = full.intersection(buf.area);
        if visible.is_empty() {
            return;
        }

        let paragraph = Paragraph::new(content).block(self.block.clone());
        if visible == full {
            paragraph.render(full, buf);
            return;
        }

        let mut scratch = Buffer::empty(full);
        paragraph.render(full, &mut scratch);
        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                if let (Some(src), Some(dst)) = (scratch.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}

/// Memoized [`CellStyle`]s for one theme.
///
/// The key space is bounded only by the sizes a terminal passes through, so
/// the cache is cleared wholesale once it reaches its capacity.
///
/// # Examples
///
/// ```
/// use dashboard_tui::StyleCache;
///
/// let mut cache = StyleCache::default();
/// let a = cache.get_style(20, 5, true);
/// let b = cache.get_style(20, 5, true);
/// assert_eq!(a, b);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct StyleCache {
    theme: Theme,
    styles: HashMap<StyleKey, CellStyle>,
    capacity: usize,
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl StyleCache {
    /// Creates an empty cache for `theme`.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_capacity(theme, DEFAULT_CAPACITY)
    }

    /// Creates an empty cache holding at most `capacity` styles.
    #[must_use]
    pub fn with_capacity(theme: Theme, capacity: usize) -> Self {
        Self {
            theme,
            styles: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns the active theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Switches theme, dropping every cached style.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.styles.clear();
        }
    }

    /// Returns the style for a cell of the given size and focus state.
    pub fn get_style(&mut self, width: u16, height: u16, focused: bool) -> CellStyle {
        let key = StyleKey {
            width,
            height,
            focused,
        };
        if let Some(style) = self.styles.get(&key) {
            return style.clone();
        }

        if self.styles.len() >= self.capacity {
            trace!(capacity = self.capacity, "style cache full, clearing");
            self.styles.clear();
        }

        let style = CellStyle::new(key, &self.theme);
        self.styles.insert(key, style.clone());
        style
    }

    /// Returns the number of cached styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
