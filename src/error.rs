use thiserror::Error;

/// Convenient result alias for operations that validate their input grid.
pub type Result<T> = std::result::Result<T, GridError>;

/// Rejection of malformed search input. Raised before any search work is done.
///
/// Note that the absence of a path is *not* an error; searches report it as [None].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows or its rows have no cells.
    #[error("grid has no cells")]
    Empty,

    /// A row differs in length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The start or goal lies outside the grid.
    #[error("{endpoint} ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        endpoint: &'static str,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}
