//! Property tests for the grid engine on random layouts of up to ~1000 cells.
//!
//! Invariants covered:
//! - `neighbors` stays in bounds, returns at most 6 cells and is symmetric.
//! - `find_cluster` agrees with a whole-grid flood-fill labelling and is
//!   idempotent over its members.
//! - After `resolve_drops` every remaining bubble reaches row 0, and exactly
//!   the popped and fallen cells were cleared.
//! - A successful `apply_shot` puts the landing cell in its own cluster.

use std::collections::{HashMap, HashSet};

use bubble_shooter::{
    BubbleGrid, BubbleType, GridError, GridRules, HexCoord, LevelLayout, RowLayout, apply_shot,
    find_cluster, resolve_drops,
};
use proptest::prelude::*;

/// Only a few types, so that clusters actually form.
const TYPES: [BubbleType; 4] = [
    BubbleType::Red,
    BubbleType::Blue,
    BubbleType::Green,
    BubbleType::Yellow,
];

fn layout_strategy() -> impl Strategy<Value = LevelLayout> {
    (1usize..=31, 1usize..=32, any::<bool>()).prop_flat_map(|(row_count, columns, alternating)| {
        let row_layout = if alternating {
            RowLayout::Alternating
        } else {
            RowLayout::Uniform
        };
        let cell = proptest::option::weighted(0.7, 0..TYPES.len());
        proptest::collection::vec(cell, row_count * columns).prop_map(move |flat| {
            let rows = (0..row_count)
                .map(|r| {
                    let len = row_layout.row_len(columns, r);
                    flat[r * columns..r * columns + len]
                        .iter()
                        .map(|t| t.map(|i| TYPES[i]))
                        .collect()
                })
                .collect();
            LevelLayout {
                columns,
                row_layout,
                row_count,
                rows,
            }
        })
    })
}

fn all_coords(grid: &BubbleGrid) -> Vec<HexCoord> {
    (0..grid.row_count() as i32)
        .flat_map(|r| {
            let len = grid.row_len(r).unwrap_or(0) as i32;
            (0..len).map(move |c| HexCoord::new(r, c))
        })
        .collect()
}

/// Label every occupied cell with the smallest coordinate of its same-type
/// component, relaxing until nothing changes.
fn brute_force_labels(grid: &BubbleGrid) -> HashMap<HexCoord, HexCoord> {
    let mut labels: HashMap<HexCoord, HexCoord> =
        grid.occupied().map(|(coord, _)| (coord, coord)).collect();

    loop {
        let mut changed = false;
        for (coord, bubble) in grid.occupied() {
            for n in grid.neighbors(coord).unwrap() {
                if grid.bubble_at(n) == Some(bubble) && labels[&n] < labels[&coord] {
                    labels.insert(coord, labels[&n]);
                    changed = true;
                }
            }
        }
        if !changed {
            return labels;
        }
    }
}

/// Cells reachable from row 0, grown one ring at a time until stable.
fn brute_force_supported(grid: &BubbleGrid) -> HashSet<HexCoord> {
    let mut supported: HashSet<HexCoord> = grid
        .occupied()
        .filter(|(coord, _)| coord.row == 0)
        .map(|(coord, _)| coord)
        .collect();

    loop {
        let before = supported.len();
        for (coord, _) in grid.occupied() {
            if grid
                .neighbors(coord)
                .unwrap()
                .iter()
                .any(|n| supported.contains(n))
            {
                supported.insert(coord);
            }
        }
        if supported.len() == before {
            return supported;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn neighbors_are_bounded_and_symmetric(layout in layout_strategy()) {
        let grid = BubbleGrid::from_layout(&layout).unwrap();
        for coord in all_coords(&grid) {
            let neighbors = grid.neighbors(coord).unwrap();
            prop_assert!(neighbors.len() <= 6);
            for n in neighbors {
                prop_assert!(grid.contains(n));
                prop_assert!(grid.neighbors(n).unwrap().contains(&coord));
            }
        }
    }

    #[test]
    fn cluster_matches_brute_force_labelling(layout in layout_strategy()) {
        let grid = BubbleGrid::from_layout(&layout).unwrap();
        let labels = brute_force_labels(&grid);

        for (origin, _) in grid.occupied() {
            let expected: HashSet<HexCoord> = labels
                .iter()
                .filter(|(_, label)| **label == labels[&origin])
                .map(|(coord, _)| *coord)
                .collect();
            let cluster = find_cluster(&grid, origin).unwrap();
            prop_assert_eq!(&cluster, &expected);

            let member = *cluster.iter().max().unwrap();
            prop_assert_eq!(find_cluster(&grid, member).unwrap(), cluster);
        }

        for coord in all_coords(&grid) {
            if !grid.is_occupied(coord) {
                prop_assert_eq!(find_cluster(&grid, coord), Err(GridError::EmptyOrigin(coord)));
            }
        }
    }

    #[test]
    fn shots_leave_only_supported_bubbles(
        layout in layout_strategy(),
        picks in proptest::collection::vec((any::<prop::sample::Index>(), 0..TYPES.len()), 1..8),
        threshold in 1usize..=4,
    ) {
        let mut grid = BubbleGrid::from_layout(&layout).unwrap();
        let rules = GridRules { pop_threshold: threshold };

        for (pick, t) in picks {
            let candidates: Vec<HexCoord> = all_coords(&grid)
                .into_iter()
                .filter(|c| !grid.is_occupied(*c) && (c.row == 0 || grid.is_adjacent_to_bubble(*c)))
                .collect();
            if candidates.is_empty() {
                break;
            }
            let landing = *pick.get(&candidates);
            let bubble = TYPES[t];

            apply_shot(&mut grid, landing, bubble).unwrap();
            prop_assert!(find_cluster(&grid, landing).unwrap().contains(&landing));

            let before = grid.clone();
            let outcome = resolve_drops(&mut grid, landing, &rules).unwrap();

            if outcome.is_empty() {
                prop_assert_eq!(&grid, &before);
                continue;
            }

            prop_assert!(outcome.popped.len() >= threshold);
            prop_assert!(outcome.popped.contains(&landing));
            prop_assert!(outcome.popped.is_disjoint(&outcome.fallen));

            for (coord, bubble) in before.occupied() {
                let removed = outcome.popped.contains(&coord) || outcome.fallen.contains(&coord);
                prop_assert_eq!(grid.bubble_at(coord), if removed { None } else { Some(bubble) });
            }

            let supported = brute_force_supported(&grid);
            for (coord, _) in grid.occupied() {
                prop_assert!(supported.contains(&coord), "{} has no path to row 0", coord);
            }
        }
    }

    #[test]
    fn shot_on_occupied_cell_is_invalid(layout in layout_strategy()) {
        let mut grid = BubbleGrid::from_layout(&layout).unwrap();
        let before = grid.clone();
        let occupied: Vec<HexCoord> = grid.occupied().map(|(c, _)| c).collect();
        for coord in occupied {
            prop_assert_eq!(
                apply_shot(&mut grid, coord, BubbleType::Purple),
                Err(GridError::InvalidPlacement(coord))
            );
        }
        prop_assert_eq!(grid, before);
    }
}
