//! The staggered grid that holds all bubbles.
//!
//! Cells are stored row by row in a dense 2D array, the same shape the level
//! editor paints into. Every row has a fixed number of columns decided when
//! the grid is built; in the [`RowLayout::Alternating`] layout odd rows are one
//! cell shorter so the shifted row does not overhang the right wall.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    bubble::{BubbleType, Cell},
    error::{GridError, LayoutError},
    hex::HexCoord,
};

/// Number of columns in the default grid (the editor's row width).
pub const DEFAULT_COLUMNS: usize = 9;

/// Number of rows in the default grid.
pub const DEFAULT_ROWS: usize = 14;

/// Largest number of cells a grid may hold. Keeps every coordinate within
/// `i32` and bounds the allocation for untrusted layouts.
pub const MAX_CELLS: usize = 1 << 20;

/// How many cells each row holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RowLayout {
    /// Every row has the full column count.
    Uniform,
    /// Odd rows have one cell fewer than even rows.
    #[default]
    Alternating,
}

impl RowLayout {
    /// Number of cells in `row` for a grid `columns` wide.
    pub const fn row_len(self, columns: usize, row: usize) -> usize {
        match self {
            RowLayout::Uniform => columns,
            RowLayout::Alternating => columns.saturating_sub(row % 2),
        }
    }
}

/// A level's bubble layout, as handed over by the level loader.
///
/// `rows` lists the top rows of the level; rows past its end are empty, and
/// so are cells past the end of a shorter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub columns: usize,
    #[serde(default)]
    pub row_layout: RowLayout,
    pub row_count: usize,
    #[serde(default)]
    pub rows: Vec<Vec<Option<BubbleType>>>,
}

/// The bubble grid of one level session.
///
/// Only the engine operations ([`apply_shot`](super::shot::apply_shot) and
/// [`resolve_drops`](super::cluster::resolve_drops)) change cells once the
/// grid is built.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct BubbleGrid {
    columns: usize,
    row_layout: RowLayout,
    rows: Vec<Vec<Cell>>,
}

impl Default for BubbleGrid {
    fn default() -> Self {
        Self::empty(DEFAULT_ROWS, DEFAULT_COLUMNS, RowLayout::default())
    }
}

impl BubbleGrid {
    /// Create a grid with every cell empty.
    pub fn new(
        row_count: usize,
        columns: usize,
        row_layout: RowLayout,
    ) -> Result<Self, LayoutError> {
        if columns == 0 {
            return Err(LayoutError::ZeroColumns);
        }
        if row_count
            .checked_mul(columns)
            .is_none_or(|cells| cells > MAX_CELLS)
        {
            return Err(LayoutError::TooLarge {
                row_count,
                columns,
                max_cells: MAX_CELLS,
            });
        }
        Ok(Self::empty(row_count, columns, row_layout))
    }

    fn empty(row_count: usize, columns: usize, row_layout: RowLayout) -> Self {
        let rows = (0..row_count)
            .map(|r| vec![Cell::Empty; row_layout.row_len(columns, r)])
            .collect();
        Self {
            columns,
            row_layout,
            rows,
        }
    }

    /// Build a grid from a level layout.
    pub fn from_layout(layout: &LevelLayout) -> Result<Self, LayoutError> {
        if layout.rows.len() > layout.row_count {
            return Err(LayoutError::RowCount {
                rows: layout.rows.len(),
                row_count: layout.row_count,
            });
        }

        let mut grid = Self::new(layout.row_count, layout.columns, layout.row_layout)?;
        for (r, row) in layout.rows.iter().enumerate() {
            let max = grid.rows[r].len();
            if row.len() > max {
                return Err(LayoutError::RowTooWide {
                    row: r,
                    len: row.len(),
                    max,
                });
            }
            for (c, bubble) in row.iter().enumerate() {
                grid.rows[r][c] = Cell::from(*bubble);
            }
        }

        debug!(
            "Built {}x{} grid with {} bubbles",
            grid.row_count(),
            grid.columns,
            grid.len()
        );
        Ok(grid)
    }

    /// Build a grid whose top `filled_rows` rows hold random bubbles.
    pub fn random<R: Rng + ?Sized>(
        row_count: usize,
        columns: usize,
        row_layout: RowLayout,
        filled_rows: usize,
        rng: &mut R,
    ) -> Result<Self, LayoutError> {
        let mut grid = Self::new(row_count, columns, row_layout)?;
        for row in grid.rows.iter_mut().take(filled_rows) {
            for cell in row.iter_mut() {
                *cell = Cell::Occupied(BubbleType::random(rng));
            }
        }

        info!("Spawned {} random bubbles", grid.len());
        Ok(grid)
    }

    /// Snapshot the grid as a layout.
    ///
    /// Trailing rows with no bubbles are dropped from `rows`; `row_count`
    /// still records the full grid height.
    pub fn to_layout(&self) -> LevelLayout {
        let used = self
            .rows
            .iter()
            .rposition(|row| row.iter().any(Cell::is_occupied))
            .map_or(0, |r| r + 1);

        LevelLayout {
            columns: self.columns,
            row_layout: self.row_layout,
            row_count: self.row_count(),
            rows: self.rows[..used]
                .iter()
                .map(|row| row.iter().map(Cell::bubble).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row_layout(&self) -> RowLayout {
        self.row_layout
    }

    /// Number of cells in a row, or `None` if the row does not exist.
    pub fn row_len(&self, row: i32) -> Option<usize> {
        usize::try_from(row)
            .ok()
            .and_then(|r| self.rows.get(r))
            .map(Vec::len)
    }

    fn index(&self, coord: HexCoord) -> Option<(usize, usize)> {
        let r = usize::try_from(coord.row).ok()?;
        let c = usize::try_from(coord.col).ok()?;
        (c < self.rows.get(r)?.len()).then_some((r, c))
    }

    /// Check if a coordinate is within bounds.
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index(coord).is_some()
    }

    pub fn cell(&self, coord: HexCoord) -> Result<Cell, GridError> {
        self.index(coord)
            .map(|(r, c)| self.rows[r][c])
            .ok_or(GridError::OutOfBounds(coord))
    }

    /// The bubble at a position, if any. Out-of-bounds cells hold nothing.
    pub fn bubble_at(&self, coord: HexCoord) -> Option<BubbleType> {
        self.index(coord).and_then(|(r, c)| self.rows[r][c].bubble())
    }

    /// Check if a cell is occupied.
    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.bubble_at(coord).is_some()
    }

    /// The in-bounds neighbors of a cell.
    pub fn neighbors(&self, coord: HexCoord) -> Result<Vec<HexCoord>, GridError> {
        if !self.contains(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        Ok(self.neighbors_in_bounds(coord).collect())
    }

    pub(crate) fn neighbors_in_bounds(
        &self,
        coord: HexCoord,
    ) -> impl Iterator<Item = HexCoord> + '_ {
        coord
            .neighbors()
            .into_iter()
            .filter(move |n| self.contains(*n))
    }

    /// Check if a coordinate is adjacent to any occupied cell.
    pub fn is_adjacent_to_bubble(&self, coord: HexCoord) -> bool {
        self.neighbors_in_bounds(coord).any(|n| self.is_occupied(n))
    }

    /// Iterate over all occupied cells, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (HexCoord, BubbleType)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.bubble()
                    .map(|bubble| (HexCoord::new(r as i32, c as i32), bubble))
            })
        })
    }

    /// Occupied cells of the anchor row (row 0).
    pub fn anchor_coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.occupied().take_while(|(coord, _)| coord.row == 0).map(|(coord, _)| coord)
    }

    /// Get the number of bubbles in the grid.
    pub fn len(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_occupied()).count())
            .sum()
    }

    /// Check if the grid holds no bubbles.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|cell| !cell.is_occupied())
    }

    /// Get the lowest row (highest index) that has bubbles.
    pub fn lowest_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(Cell::is_occupied))
    }

    /// Write a cell. Callers check bounds beforehand.
    pub(crate) fn set(&mut self, coord: HexCoord, cell: Cell) {
        if let Some((r, c)) = self.index(coord) {
            self.rows[r][c] = cell;
        }
    }
}
