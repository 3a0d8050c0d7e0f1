//! The grid engine for the bubble shooter.
//!
//! This module contains the gameplay rules that sit under the level editor
//! and the game session:
//! - Staggered grid coordinates (odd-r offset)
//! - Bubble types and the grid that stores them
//! - Attaching landed shots
//! - Cluster detection, popping and floating-bubble drops
//!
//! The functions here are plain Rust over a caller-owned [`BubbleGrid`]; the
//! plugin only routes landing messages through them.

mod bubble;
mod cluster;
mod error;
mod grid;
mod hex;
mod rules;
mod shot;

use bevy::prelude::*;

pub use bubble::{BubbleType, Cell};
pub use cluster::{
    BubblesFell, ClusterPopped, GridCleared, GridSystems, ShotOutcome, find_cluster,
    find_supported, resolve_drops,
};
pub use error::{ConfigError, GridError, LayoutError};
pub use grid::{BubbleGrid, DEFAULT_COLUMNS, DEFAULT_ROWS, LevelLayout, MAX_CELLS, RowLayout};
pub use hex::{HexCoord, SQRT_3};
pub use rules::{DEFAULT_POP_THRESHOLD, GridRules};
pub use shot::{BubbleLanded, ShotRejected, apply_shot};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HexCoord>();
    app.register_type::<BubbleGrid>();
    app.register_type::<GridRules>();
    app.init_resource::<BubbleGrid>();
    app.init_resource::<GridRules>();

    app.add_plugins((shot::plugin, cluster::plugin));
}
