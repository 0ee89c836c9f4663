//! Grid placement and size resolution.
//!
//! The container divides its area into `rows × cols` base cells separated by
//! fixed gaps. A widget's placement names its origin cell and how many cells
//! it spans; its resolved size covers those cells and the gaps between them,
//! and is never smaller than the placement's declared minimum. When minimums
//! push widgets past the container edge they overflow and are clipped at
//! render time.
//!
//! All arithmetic saturates, so every function here is total.

use ratatui::layout::{Position, Size};

use crate::error::UiError;
use crate::layout::{CELL_GAP, MIN_CELL_HEIGHT, MIN_CELL_WIDTH, ROW_GAP};

/// A widget's placement within the grid.
///
/// # Examples
///
/// ```
/// use dashboard_tui::GridConfig;
///
/// let config = GridConfig::at(0, 0).span(1, 2).min_size(40, 0);
/// assert!(config.contains(0, 1));
/// assert!(!config.contains(1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    /// Origin row.
    pub row: u16,
    /// Origin column.
    pub col: u16,
    /// Rows covered, at least one.
    pub row_span: u16,
    /// Columns covered, at least one.
    pub col_span: u16,
    /// Smallest width the widget is resolved to.
    pub min_width: u16,
    /// Smallest height the widget is resolved to.
    pub min_height: u16,
}

impl GridConfig {
    /// Places a single-cell widget at `(row, col)` with no minimum size.
    #[must_use]
    pub const fn at(row: u16, col: u16) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            min_width: 0,
            min_height: 0,
        }
    }

    /// Sets the number of rows and columns covered.
    #[must_use]
    pub const fn span(mut self, row_span: u16, col_span: u16) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    /// Sets the minimum resolved size.
    #[must_use]
    pub const fn min_size(mut self, min_width: u16, min_height: u16) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    fn row_end(&self) -> u32 {
        u32::from(self.row) + u32::from(self.row_span)
    }

    fn col_end(&self) -> u32 {
        u32::from(self.col) + u32::from(self.col_span)
    }

    /// Returns `true` if the placement covers cell `(row, col)`.
    #[must_use]
    pub fn contains(&self, row: u16, col: u16) -> bool {
        row >= self.row
            && u32::from(row) < self.row_end()
            && col >= self.col
            && u32::from(col) < self.col_end()
    }

    /// Returns `true` if both placements cover at least one common cell.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        u32::from(self.row) < other.row_end()
            && u32::from(other.row) < self.row_end()
            && u32::from(self.col) < other.col_end()
            && u32::from(other.col) < self.col_end()
    }
}

/// The grid a container lays its widgets out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub cols: u16,
    /// Columns between horizontally adjacent cells.
    pub cell_gap: u16,
    /// Rows between vertically adjacent cells.
    pub row_gap: u16,
}

impl GridSpec {
    /// Creates a grid with the default gaps.
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cell_gap: CELL_GAP,
            row_gap: ROW_GAP,
        }
    }

    /// Computes the base cell size for a container of size `area`.
    ///
    /// ```text
    /// cell_width  = max(MIN_CELL_WIDTH,  (width  - gap * (cols - 1)) / cols)
    /// cell_height = max(MIN_CELL_HEIGHT, (height - gap * (rows - 1)) / rows)
    /// ```
    #[must_use]
    pub fn base_cell(&self, area: Size) -> Size {
        Size::new(
            base_extent(area.width, self.cols, self.cell_gap, MIN_CELL_WIDTH),
            base_extent(area.height, self.rows, self.row_gap, MIN_CELL_HEIGHT),
        )
    }

    /// Resolves the size of a widget placed with `config`.
    ///
    /// ```text
    /// width  = max(min_width,  cell_width  * col_span + gap * (col_span - 1))
    /// height = max(min_height, cell_height * row_span + gap * (row_span - 1))
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_tui::{GridConfig, GridSpec};
    /// use ratatui::layout::Size;
    ///
    /// let grid = GridSpec::new(2, 2);
    /// let wide = GridConfig::at(0, 0).span(1, 2).min_size(40, 0);
    ///
    /// assert_eq!(grid.resolve(Size::new(80, 24), &wide), Size::new(79, 12));
    /// assert_eq!(grid.resolve(Size::new(40, 10), &wide), Size::new(40, 5));
    /// ```
    #[must_use]
    pub fn resolve(&self, area: Size, config: &GridConfig) -> Size {
        let base = self.base_cell(area);
        Size::new(
            spanned_extent(base.width, config.col_span, self.cell_gap).max(config.min_width),
            spanned_extent(base.height, config.row_span, self.row_gap).max(config.min_height),
        )
    }

    /// Returns the offset of cell `(row, col)` from the container's origin.
    #[must_use]
    pub fn cell_offset(&self, base: Size, row: u16, col: u16) -> Position {
        let step = |index: u16, extent: u16, gap: u16| {
            saturate(u32::from(index) * (u32::from(extent) + u32::from(gap)))
        };
        Position::new(
            step(col, base.width, self.cell_gap),
            step(row, base.height, self.row_gap),
        )
    }

    /// Checks a new placement against the grid bounds and existing placements.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ZeroSpan`], [`UiError::OutOfGrid`] or
    /// [`UiError::Overlap`] describing the first problem found.
    pub fn check_placement<'a>(
        &self,
        config: &GridConfig,
        existing: impl IntoIterator<Item = &'a GridConfig>,
    ) -> Result<(), UiError> {
        if config.row_span == 0 || config.col_span == 0 {
            return Err(UiError::ZeroSpan {
                row: config.row,
                col: config.col,
            });
        }

        if config.row_end() > u32::from(self.rows) || config.col_end() > u32::from(self.cols) {
            return Err(UiError::OutOfGrid {
                row: config.row,
                col: config.col,
                row_span: config.row_span,
                col_span: config.col_span,
                rows: self.rows,
                cols: self.cols,
            });
        }

        if let Some(existing) = existing.into_iter().position(|other| other.overlaps(config)) {
            return Err(UiError::Overlap {
                row: config.row,
                col: config.col,
                existing,
            });
        }

        Ok(())
    }
}

/// Returns the index of the first placement covering `(row, col)`.
pub fn occupant<'a>(
    configs: impl IntoIterator<Item = &'a GridConfig>,
    row: u16,
    col: u16,
) -> Option<usize> {
    configs
        .into_iter()
        .position(|config| config.contains(row, col))
}

fn base_extent(total: u16, count: u16, gap: u16, minimum: u16) -> u16 {
    let count = u32::from(count.max(1));
    let gaps = u32::from(gap) * (count - 1);
    let available = u32::from(total).saturating_sub(gaps);
    saturate(available / count).max(minimum)
}

fn spanned_extent(cell: u16, span: u16, gap: u16) -> u16 {
    let span = u32::from(span);
    saturate(u32::from(cell) * span + u32::from(gap) * span.saturating_sub(1))
}

fn saturate(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cell_divides_after_gaps() {
        let grid = GridSpec::new(2, 2);
        assert_eq!(grid.base_cell(Size::new(81, 24)), Size::new(40, 12));
    }

    #[test]
    fn base_cell_is_clamped_to_minimum() {
        let grid = GridSpec::new(4, 8);
        assert_eq!(
            grid.base_cell(Size::new(20, 4)),
            Size::new(MIN_CELL_WIDTH, MIN_CELL_HEIGHT)
        );
    }

    #[test]
    fn zero_rows_and_cols_do_not_divide_by_zero() {
        let grid = GridSpec::new(0, 0);
        assert_eq!(grid.base_cell(Size::new(50, 20)), Size::new(50, 20));
        assert_eq!(
            grid.base_cell(Size::new(0, 0)),
            Size::new(MIN_CELL_WIDTH, MIN_CELL_HEIGHT)
        );
    }

    #[test]
    fn span_includes_inner_gaps() {
        let grid = GridSpec::new(1, 3);
        let base = grid.base_cell(Size::new(32, 10));
        assert_eq!(base.width, 10);

        let size = grid.resolve(Size::new(32, 10), &GridConfig::at(0, 0).span(1, 3));
        assert_eq!(size.width, 32);
    }

    #[test]
    fn minimum_wins_over_division() {
        let grid = GridSpec::new(2, 2);
        let config = GridConfig::at(1, 1).min_size(60, 20);
        assert_eq!(grid.resolve(Size::new(40, 10), &config), Size::new(60, 20));
    }

    #[test]
    fn cell_offset_steps_over_gaps() {
        let grid = GridSpec::new(2, 2);
        let base = Size::new(19, 5);
        assert_eq!(grid.cell_offset(base, 0, 0), Position::new(0, 0));
        assert_eq!(grid.cell_offset(base, 1, 1), Position::new(20, 5));
    }

    #[test]
    fn huge_values_saturate() {
        let grid = GridSpec::new(1, 1);
        let config = GridConfig::at(0, 0).span(u16::MAX, u16::MAX);
        let size = grid.resolve(Size::new(u16::MAX, u16::MAX), &config);
        assert_eq!(size, Size::new(u16::MAX, u16::MAX));
        assert_eq!(
            grid.cell_offset(size, u16::MAX, u16::MAX),
            Position::new(u16::MAX, u16::MAX)
        );
    }

    #[test]
    fn overlap_is_symmetric_and_edge_exclusive() {
        let a = GridConfig::at(0, 0).span(1, 2);
        let b = GridConfig::at(0, 1);
        let c = GridConfig::at(1, 0);
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a));
    }

    #[test]
    fn check_placement_rejects_problems() {
        let grid = GridSpec::new(2, 2);
        let placed = [GridConfig::at(0, 0).span(1, 2)];

        assert_eq!(
            grid.check_placement(&GridConfig::at(1, 0).span(0, 1), &placed),
            Err(UiError::ZeroSpan { row: 1, col: 0 })
        );
        assert!(matches!(
            grid.check_placement(&GridConfig::at(1, 1).span(1, 2), &placed),
            Err(UiError::OutOfGrid { .. })
        ));
        assert_eq!(
            grid.check_placement(&GridConfig::at(0, 1), &placed),
            Err(UiError::Overlap {
                row: 0,
                col: 1,
                existing: 0
            })
        );
        assert!(grid.check_placement(&GridConfig::at(1, 1), &placed).is_ok());
    }

    #[test]
    fn occupant_first_match_wins() {
        let configs = [GridConfig::at(0, 0).span(2, 2), GridConfig::at(1, 1)];
        assert_eq!(occupant(&configs, 1, 1), Some(0));
        assert_eq!(occupant(&configs, 2, 0), None);
    }
}
