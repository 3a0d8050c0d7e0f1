//! Error types for grid operations, layout construction and rule loading.

use thiserror::Error;

use super::hex::HexCoord;

/// Failure of a grid engine operation.
///
/// Every check runs before the grid is touched, so an error always means the
/// grid is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside the grid.
    #[error("cell {0} is outside the grid")]
    OutOfBounds(HexCoord),
    /// The landing cell is occupied, or has nothing to attach to.
    #[error("a bubble cannot be placed at {0}")]
    InvalidPlacement(HexCoord),
    /// A cluster search started from an empty cell.
    #[error("cell {0} holds no bubble")]
    EmptyOrigin(HexCoord),
}

impl GridError {
    pub const fn coord(&self) -> HexCoord {
        match self {
            GridError::OutOfBounds(coord)
            | GridError::InvalidPlacement(coord)
            | GridError::EmptyOrigin(coord) => *coord,
        }
    }
}

/// A level layout that does not fit its declared shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("a grid needs at least one column")]
    ZeroColumns,
    #[error("a {row_count}x{columns} grid exceeds the limit of {max_cells} cells")]
    TooLarge {
        row_count: usize,
        columns: usize,
        max_cells: usize,
    },
    /// More rows were supplied than the layout declares.
    #[error("layout has {rows} rows but declares {row_count}")]
    RowCount { rows: usize, row_count: usize },
    #[error("row {row} has {len} cells, at most {max} fit")]
    RowTooWide { row: usize, len: usize, max: usize },
}

/// Failure to load [`GridRules`](super::rules::GridRules).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read grid rules: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse grid rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid grid rules: {0}")]
    Invalid(String),
}
