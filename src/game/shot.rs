//! Shots - attaching a launched bubble to the grid.
//!
//! The launcher and its physics live outside this crate. Once a bubble comes
//! to rest, the game sends [`BubbleLanded`] with the cell it snapped to.

use bevy::prelude::*;

use super::{
    bubble::{BubbleType, Cell},
    error::GridError,
    grid::BubbleGrid,
    hex::HexCoord,
};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<BubbleLanded>();
    app.add_message::<ShotRejected>();
}

/// Message sent when a launched bubble comes to rest at a cell.
/// Used to trigger cluster detection.
#[derive(Message, Debug, Clone)]
pub struct BubbleLanded {
    pub coord: HexCoord,
    pub bubble: BubbleType,
}

/// Message sent when a landed bubble cannot attach; the launcher may re-aim.
#[derive(Message, Debug, Clone)]
pub struct ShotRejected {
    pub coord: HexCoord,
    pub bubble: BubbleType,
    pub error: GridError,
}

/// Attach a bubble to the grid.
///
/// The landing cell must be empty, and either touch an occupied cell or sit
/// in the anchor row (where it hangs from the ceiling). On error the grid is
/// left untouched.
pub fn apply_shot(
    grid: &mut BubbleGrid,
    landing: HexCoord,
    bubble: BubbleType,
) -> Result<(), GridError> {
    if grid.cell(landing)?.is_occupied() {
        return Err(GridError::InvalidPlacement(landing));
    }
    if landing.row != 0 && !grid.is_adjacent_to_bubble(landing) {
        return Err(GridError::InvalidPlacement(landing));
    }

    grid.set(landing, Cell::Occupied(bubble));
    debug!("Placed {:?} bubble at {}", bubble, landing);
    Ok(())
}
