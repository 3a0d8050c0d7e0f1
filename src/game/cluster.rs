//! Cluster detection - finding and popping matching bubbles.
//!
//! Uses flood fill (BFS) to find connected groups of same-type bubbles.
//! When a cluster reaches the pop threshold it pops, and every bubble that
//! lost its path to the anchor row falls.

use bevy::prelude::*;
use std::collections::{HashSet, VecDeque};

use super::{
    bubble::{BubbleType, Cell},
    error::GridError,
    grid::BubbleGrid,
    hex::HexCoord,
    rules::GridRules,
    shot::{BubbleLanded, ShotRejected, apply_shot},
};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<ClusterPopped>();
    app.add_message::<BubblesFell>();
    app.add_message::<GridCleared>();

    app.add_systems(Update, resolve_landed_bubbles.in_set(GridSystems));
}

/// System set for the grid engine systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridSystems;

/// Message sent when a cluster is popped.
#[derive(Message, Debug, Clone)]
pub struct ClusterPopped {
    pub coords: Vec<HexCoord>,
    pub bubble: BubbleType,
    pub count: usize,
}

/// Message sent when unsupported bubbles fall, for the drop animation.
#[derive(Message, Debug, Clone)]
pub struct BubblesFell {
    pub coords: Vec<HexCoord>,
    pub count: usize,
}

/// Message sent when a shot leaves the grid without bubbles.
#[derive(Message, Debug, Clone)]
pub struct GridCleared;

/// Cells removed by one shot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotOutcome {
    /// The matching cluster, if it reached the pop threshold.
    pub popped: HashSet<HexCoord>,
    /// Bubbles left without a path to the anchor row.
    pub fallen: HashSet<HexCoord>,
}

impl ShotOutcome {
    /// True when the shot removed nothing.
    pub fn is_empty(&self) -> bool {
        self.popped.is_empty() && self.fallen.is_empty()
    }
}

/// Find all connected bubbles of the same type as `origin` using flood fill (BFS).
pub fn find_cluster(grid: &BubbleGrid, origin: HexCoord) -> Result<HashSet<HexCoord>, GridError> {
    let Some(target) = grid.cell(origin)?.bubble() else {
        return Err(GridError::EmptyOrigin(origin));
    };

    let mut cluster = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);

    while let Some(coord) = queue.pop_front() {
        for neighbor in grid.neighbors_in_bounds(coord) {
            if grid.bubble_at(neighbor) == Some(target) && cluster.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    Ok(cluster)
}

/// Find all bubbles connected to the anchor row using BFS, treating the
/// `removed` cells as already empty.
///
/// The search starts from every anchor-row bubble at once.
pub fn find_supported(grid: &BubbleGrid, removed: &HashSet<HexCoord>) -> HashSet<HexCoord> {
    let mut supported = HashSet::new();
    let mut queue = VecDeque::new();

    for coord in grid.anchor_coords().filter(|c| !removed.contains(c)) {
        supported.insert(coord);
        queue.push_back(coord);
    }

    while let Some(coord) = queue.pop_front() {
        for neighbor in grid.neighbors_in_bounds(coord) {
            if grid.is_occupied(neighbor)
                && !removed.contains(&neighbor)
                && supported.insert(neighbor)
            {
                queue.push_back(neighbor);
            }
        }
    }

    supported
}

/// Pop the cluster around a freshly placed bubble and drop whatever it held up.
///
/// Below the pop threshold nothing is removed and the placed bubble stays
/// attached. Otherwise the cluster and all bubbles no longer reachable from
/// the anchor row are cleared from the grid.
pub fn resolve_drops(
    grid: &mut BubbleGrid,
    just_placed: HexCoord,
    rules: &GridRules,
) -> Result<ShotOutcome, GridError> {
    let cluster = find_cluster(grid, just_placed)?;

    if cluster.len() < rules.pop_threshold {
        debug!(
            "Cluster of {} at {} is below the pop threshold",
            cluster.len(),
            just_placed
        );
        return Ok(ShotOutcome::default());
    }

    let supported = find_supported(grid, &cluster);
    let fallen: HashSet<HexCoord> = grid
        .occupied()
        .map(|(coord, _)| coord)
        .filter(|coord| !cluster.contains(coord) && !supported.contains(coord))
        .collect();

    for &coord in cluster.iter().chain(&fallen) {
        grid.set(coord, Cell::Empty);
    }

    info!(
        "Popped {} bubbles at {}, {} fell",
        cluster.len(),
        just_placed,
        fallen.len()
    );

    Ok(ShotOutcome {
        popped: cluster,
        fallen,
    })
}

fn sorted(coords: &HashSet<HexCoord>) -> Vec<HexCoord> {
    let mut coords: Vec<_> = coords.iter().copied().collect();
    coords.sort_unstable();
    coords
}

/// Attach each landed bubble and resolve the pops and drops it causes.
fn resolve_landed_bubbles(
    mut grid: ResMut<BubbleGrid>,
    rules: Res<GridRules>,
    mut landed_events: MessageReader<BubbleLanded>,
    mut rejected_events: MessageWriter<ShotRejected>,
    mut popped_events: MessageWriter<ClusterPopped>,
    mut fell_events: MessageWriter<BubblesFell>,
    mut cleared_events: MessageWriter<GridCleared>,
) {
    for event in landed_events.read() {
        let outcome = apply_shot(&mut grid, event.coord, event.bubble)
            .and_then(|()| resolve_drops(&mut grid, event.coord, &rules));

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("Rejected {:?} shot: {}", event.bubble, error);
                rejected_events.write(ShotRejected {
                    coord: event.coord,
                    bubble: event.bubble,
                    error,
                });
                continue;
            }
        };

        if outcome.is_empty() {
            continue;
        }

        popped_events.write(ClusterPopped {
            coords: sorted(&outcome.popped),
            bubble: event.bubble,
            count: outcome.popped.len(),
        });

        if !outcome.fallen.is_empty() {
            fell_events.write(BubblesFell {
                coords: sorted(&outcome.fallen),
                count: outcome.fallen.len(),
            });
        }

        if grid.is_empty() {
            info!("Grid cleared!");
            cleared_events.write(GridCleared);
        }
    }
}
