use crate::grid::Position;
use thiserror::Error;

/// Problems building a [`Grid`](crate::grid::Grid) from raw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("expected {expected} cells for the grid, found {found}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell value {value} at index {index} (expected 0 or 1)")]
    InvalidCell { index: usize, value: u8 },

    #[error("grid of {cells} cells cannot be addressed with 32-bit indices")]
    TooLarge { cells: usize },

    #[error("invalid cell character {ch:?} at row {row}, column {column}")]
    InvalidChar { row: usize, column: usize, ch: char },
}

/// Contract violations reported by the search instead of undefined behaviour.
///
/// Running out of path is not an error: "no path" is `None` (or `-1` on the
/// flat boundary).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{what} {position:?} lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        position: (i64, i64),
        width: usize,
        height: usize,
    },

    #[error("search gave up after expanding {expanded} nodes")]
    ExpansionLimit { expanded: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl SearchError {
    pub(crate) fn out_of_bounds(what: &'static str, pos: Position, width: usize, height: usize) -> Self {
        SearchError::OutOfBounds {
            what,
            position: (pos.x as i64, pos.y as i64),
            width,
            height,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
