//! Staggered grid coordinates using offset coordinates (odd-r).
//!
//! Based on Red Blob Games' guide:
//! https://www.redblobgames.com/grids/hexagons/
//!
//! Bubbles are packed like pointy-top hexagons. Odd rows are shifted right by
//! half a bubble, so the six neighbors of a cell depend on its row parity.
//! This is the classic bubble shooter layout, and the one the level editor
//! paints into.

use bevy::prelude::*;

/// Square root of 3, used for the vertical spacing between packed rows.
pub const SQRT_3: f32 = 1.732_050_8;

/// Offset coordinate of a cell in the bubble grid (odd-r system).
///
/// - `row` increases downward, row 0 is the anchor row at the top
/// - `col` increases to the right
/// - Odd rows are shifted right by half a bubble width
///
/// Coordinates are signed so that neighbor math can step outside the grid;
/// [`BubbleGrid`](super::grid::BubbleGrid) decides what is in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub struct HexCoord {
    /// Row (y-axis, downward)
    pub row: i32,
    /// Column (x-axis)
    pub col: i32,
}

impl HexCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_odd_row(&self) -> bool {
        self.row % 2 != 0
    }

    /// All 6 neighboring coordinates, ignoring grid bounds.
    ///
    /// Odd rows are shifted right, so the diagonal offsets differ by parity.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        let (row, col) = (self.row, self.col);

        if self.is_odd_row() {
            [
                HexCoord::new(row, col + 1),     // East
                HexCoord::new(row - 1, col + 1), // Northeast
                HexCoord::new(row - 1, col),     // Northwest
                HexCoord::new(row, col - 1),     // West
                HexCoord::new(row + 1, col),     // Southwest
                HexCoord::new(row + 1, col + 1), // Southeast
            ]
        } else {
            [
                HexCoord::new(row, col + 1),     // East
                HexCoord::new(row - 1, col),     // Northeast
                HexCoord::new(row - 1, col - 1), // Northwest
                HexCoord::new(row, col - 1),     // West
                HexCoord::new(row + 1, col - 1), // Southwest
                HexCoord::new(row + 1, col),     // Southeast
            ]
        }
    }

    /// Center of this cell in world space.
    ///
    /// `origin` is the center of cell (0, 0). Bubbles touch their neighbors,
    /// so columns are `2 * radius` apart and rows `sqrt(3) * radius` apart.
    /// World Y grows upward while rows grow downward.
    pub fn to_pixel(&self, radius: f32, origin: Vec2) -> Vec2 {
        let row_offset = if self.is_odd_row() { 0.5 } else { 0.0 };
        let x = 2.0 * radius * (self.col as f32 + row_offset);
        let y = SQRT_3 * radius * self.row as f32;
        Vec2::new(origin.x + x, origin.y - y)
    }

    /// Nearest cell to a world position.
    ///
    /// Finds the row first, then the column corrected for the row's shift.
    /// The result may lie outside the grid; check it with `BubbleGrid::contains`.
    pub fn from_pixel(pos: Vec2, radius: f32, origin: Vec2) -> Self {
        let y = origin.y - pos.y;
        let x = pos.x - origin.x;

        let row = (y / (SQRT_3 * radius)).round() as i32;
        let row_offset = if row % 2 != 0 { 0.5 } else { 0.0 };
        let col = (x / (2.0 * radius) - row_offset).round() as i32;

        Self { row, col }
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
