//! Error types for the composition layer.
//!
//! Only construction and boundary checks can fail. Dispatch and rendering are
//! total over valid sizes; widget failures live in widget state.

/// Errors raised while building or sizing widgets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    /// A width or height was negative or too large for a terminal cell grid.
    #[error("invalid dimension {width}×{height}")]
    InvalidDimension {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
    },

    /// A grid placement declared a zero row or column span.
    #[error("widget at ({row}, {col}) has an empty span")]
    ZeroSpan {
        /// Origin row.
        row: u16,
        /// Origin column.
        col: u16,
    },

    /// A grid placement extends past the container's rows or columns.
    #[error("widget at ({row}, {col}) spanning {row_span}×{col_span} exceeds the {rows}×{cols} grid")]
    OutOfGrid {
        /// Origin row.
        row: u16,
        /// Origin column.
        col: u16,
        /// Rows covered.
        row_span: u16,
        /// Columns covered.
        col_span: u16,
        /// Declared grid rows.
        rows: u16,
        /// Declared grid columns.
        cols: u16,
    },

    /// A grid placement covers a cell already owned by another widget.
    #[error("widget at ({row}, {col}) overlaps widget #{existing}")]
    Overlap {
        /// Origin row of the rejected placement.
        row: u16,
        /// Origin column of the rejected placement.
        col: u16,
        /// Index of the widget already occupying the cells.
        existing: usize,
    },
}
