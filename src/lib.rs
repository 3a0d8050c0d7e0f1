//! Bubble-grid connectivity and clearing engine for the bubble shooter.
//!
//! Add [`BubbleGridPlugin`] to the game's `App`, replace the [`BubbleGrid`]
//! resource when a level loads, and send [`BubbleLanded`] whenever a launched
//! bubble comes to rest. The engine answers with [`ClusterPopped`],
//! [`BubblesFell`], [`ShotRejected`] and [`GridCleared`].
//!
//! The same operations are available as plain functions for the level editor
//! and for tests: [`apply_shot`], [`find_cluster`] and [`resolve_drops`], plus
//! [`BubbleGrid::neighbors`].

pub mod game;

use bevy::prelude::*;

pub use game::*;

/// Registers the grid resources, messages and the shot resolution system.
pub struct BubbleGridPlugin;

impl Plugin for BubbleGridPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(game::plugin);
    }
}
