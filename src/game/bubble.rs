//! Bubble types and grid cells.
//!
//! A cell either holds a bubble of one of six types or is empty.
//! Connected bubbles of the same type pop together.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The different bubble types.
/// Using 6 colors like classic Snood.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BubbleType {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl BubbleType {
    /// All bubble types, in palette order.
    pub const ALL: [BubbleType; 6] = [
        BubbleType::Red,
        BubbleType::Blue,
        BubbleType::Green,
        BubbleType::Yellow,
        BubbleType::Purple,
        BubbleType::Orange,
    ];

    /// Pick a bubble type uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(BubbleType),
}

impl Cell {
    pub const fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub const fn bubble(&self) -> Option<BubbleType> {
        match self {
            Cell::Occupied(bubble) => Some(*bubble),
            Cell::Empty => None,
        }
    }
}

impl From<Option<BubbleType>> for Cell {
    fn from(value: Option<BubbleType>) -> Self {
        value.map_or(Cell::Empty, Cell::Occupied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_cell_equality_is_by_type() {
        assert_eq!(Cell::Occupied(BubbleType::Red), Cell::Occupied(BubbleType::Red));
        assert_ne!(Cell::Occupied(BubbleType::Red), Cell::Occupied(BubbleType::Blue));
        assert_ne!(Cell::Occupied(BubbleType::Red), Cell::Empty);
    }

    #[test]
    fn test_cell_from_option() {
        assert_eq!(Cell::from(None), Cell::Empty);
        assert_eq!(
            Cell::from(Some(BubbleType::Green)).bubble(),
            Some(BubbleType::Green)
        );
    }

    #[test]
    fn test_random_covers_all_types() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(BubbleType::random(&mut rng));
        }
        assert_eq!(seen.len(), BubbleType::ALL.len());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BubbleType::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        let back: BubbleType = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(back, BubbleType::Orange);
    }
}
