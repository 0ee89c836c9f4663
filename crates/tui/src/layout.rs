//! Centralized layout measurements for the dashboard.
//!
//! Shared by the grid resolver, the container's size state machine and the
//! dashboard chrome, so the minimums line up everywhere.

/// Height of the header bar in rows.
///
/// The header displays the application title and help cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Minimum container width for grid rendering.
///
/// Below this the container shows a "window too small" placeholder.
pub const MIN_WIDTH: u16 = 40;

/// Minimum container height for grid rendering.
pub const MIN_HEIGHT: u16 = 10;

/// Minimum terminal height for rendering the header and status bar.
///
/// Between `MIN_HEIGHT` and this value the dashboard drops its chrome and
/// hands the whole area to the container.
pub const MIN_HEIGHT_WITH_CHROME: u16 = MIN_HEIGHT + HEADER_HEIGHT + STATUS_BAR_HEIGHT;

/// Smallest width a grid cell is resolved to.
///
/// Enough for the border, padding and a few characters of content.
pub const MIN_CELL_WIDTH: u16 = 10;

/// Smallest height a grid cell is resolved to.
///
/// Two border rows plus one content row.
pub const MIN_CELL_HEIGHT: u16 = 3;

/// Columns between horizontally adjacent cells.
pub const CELL_GAP: u16 = 1;

/// Rows between vertically adjacent cells.
pub const ROW_GAP: u16 = 0;
