//! Constraint-driven object placement
//!
//! Walks the final grid and applies ordered placement rules to decide where
//! objects go. This is purely a decision function: the caller owns actually
//! spawning (and later destroying) whatever visual instances the placements
//! refer to, looked up by the rule's opaque `kind` label.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::islands::Coord;
use crate::tilemap::Tilemap;

/// One placement rule. Rules are evaluated in list order per cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectRule {
    /// Opaque object label, resolved by the instantiating caller.
    pub kind: String,
    /// Layer value the object spawns on.
    pub layer: u8,
    /// Chance (percent, 0-100) of spawning on an eligible cell.
    pub saturation: i32,
    /// Required clearance (0-5) from the grid border and, via the diagonal
    /// check, from the layer boundary.
    pub distance: i32,
    /// When true, a successful spawn suppresses all later rules for the
    /// same cell.
    #[serde(default = "default_exclusive")]
    pub exclusive: bool,
}

fn default_exclusive() -> bool {
    true
}

impl ObjectRule {
    pub fn new(kind: &str, layer: u8, saturation: i32, distance: i32) -> Self {
        Self {
            kind: kind.to_string(),
            layer,
            saturation,
            distance,
            exclusive: true,
        }
    }

    pub fn non_exclusive(mut self) -> Self {
        self.exclusive = false;
        self
    }
}

/// A decided placement: which rule fired, on which cell, and where that
/// lands in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Index into the rule list that produced this placement.
    pub rule: usize,
    pub cell: Coord,
    /// World position. The grid is mirrored on both axes and centered on
    /// the map midpoint: cell (x, y) maps to (w/2 - x, h/2 - y).
    pub world: (i32, i32),
}

/// A sensible default rule set for the default three-layer map.
pub fn default_rules() -> Vec<ObjectRule> {
    vec![
        ObjectRule::new("tree", 2, 30, 1),
        ObjectRule::new("bush", 2, 10, 0),
        ObjectRule::new("rock", 1, 3, 0),
    ]
}

/// Walk the grid in scan order and decide placements. The grid is read
/// only; all randomness comes from the supplied rng.
pub fn place(grid: &Tilemap<u8>, rules: &[ObjectRule], rng: &mut impl Rng) -> Vec<Placement> {
    let width = grid.width as i32;
    let height = grid.height as i32;
    let mut placements = Vec::new();

    for x in 0..grid.width {
        for y in 0..grid.height {
            for (index, rule) in rules.iter().enumerate() {
                let xi = x as i32;
                let yi = y as i32;
                let d = rule.distance;

                if *grid.get(x, y) != rule.layer {
                    continue;
                }
                if !(xi > d + 1 && xi < width - d - 1 && yi > d + 1 && yi < height - d - 1) {
                    continue;
                }

                let spawned = if d == 0 {
                    rng.gen_range(1..=100) < rule.saturation
                } else {
                    let du = d as usize;
                    // The object must sit clear of the layer edge on all
                    // four corners at the rule's distance.
                    *grid.get(x - du, y - du) >= rule.layer
                        && *grid.get(x - du, y + du) >= rule.layer
                        && *grid.get(x + du, y - du) >= rule.layer
                        && *grid.get(x + du, y + du) >= rule.layer
                        && rng.gen_range(1..=100) < rule.saturation
                };

                if spawned {
                    placements.push(Placement {
                        rule: index,
                        cell: Coord::new(x, y),
                        world: (width / 2 - xi, height / 2 - yi),
                    });
                    if rule.exclusive {
                        break;
                    }
                }
            }
        }
    }

    placements
}
