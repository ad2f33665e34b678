//! Island partitioning and size-based reclassification
//!
//! Flood-fills connected components of a target layer value, fills in
//! undersized water pockets, submerges undersized islands and assigns the
//! survivors sequential ids. Connectivity is strictly orthogonal: the scan
//! window looks like an 8-neighborhood but diagonal cells never join a
//! component. Changing that to true 8-connectivity would change island
//! shapes, so it stays as is.

use std::collections::VecDeque;

use crate::config::MapConfig;
use crate::tilemap::Tilemap;

/// A single grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Island identifier (0 = no island, 1+ = sequential island id)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IslandId(pub u32);

impl IslandId {
    pub const NONE: IslandId = IslandId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// A retained island: a connected set of same-valued cells.
#[derive(Clone, Debug)]
pub struct Island {
    pub id: IslandId,
    pub tiles: Vec<Coord>,
}

impl Island {
    pub fn size(&self) -> usize {
        self.tiles.len()
    }
}

/// Result of the island partitioning pass.
pub struct IslandPartition {
    /// Retained islands in discovery order, ids starting at 1.
    pub islands: Vec<Island>,
    /// Per-cell island id, `IslandId::NONE` for cells outside any island.
    pub id_map: Tilemap<IslandId>,
}

impl IslandPartition {
    /// Which island a cell belongs to, if any.
    pub fn island_at(&self, x: usize, y: usize) -> Option<&Island> {
        let id = *self.id_map.get(x, y);
        if id.is_none() {
            return None;
        }
        self.islands.iter().find(|island| island.id == id)
    }
}

/// Find all connected components of `target` in the grid. Components come
/// back in scan order, so discovery order is deterministic for a fixed grid.
pub fn find_islands(grid: &Tilemap<u8>, target: u8) -> Vec<Vec<Coord>> {
    let mut islands = Vec::new();
    let mut visited = Tilemap::new_with(grid.width, grid.height, false);

    for x in 0..grid.width {
        for y in 0..grid.height {
            if !*visited.get(x, y) && *grid.get(x, y) == target {
                islands.push(flood_fill(grid, &mut visited, x, y, target));
            }
        }
    }

    islands
}

/// Breadth-first flood fill from a seed cell over orthogonal adjacency.
fn flood_fill(
    grid: &Tilemap<u8>,
    visited: &mut Tilemap<bool>,
    start_x: usize,
    start_y: usize,
    target: u8,
) -> Vec<Coord> {
    let mut island = Vec::new();
    let mut queue = VecDeque::new();

    queue.push_back(Coord::new(start_x, start_y));
    visited.set(start_x, start_y, true);

    while let Some(tile) = queue.pop_front() {
        island.push(tile);

        // Orthogonal neighbors only; diagonals do not connect.
        for (nx, ny) in grid.neighbors(tile.x, tile.y) {
            if !*visited.get(nx, ny) && *grid.get(nx, ny) == target {
                visited.set(nx, ny, true);
                queue.push_back(Coord::new(nx, ny));
            }
        }
    }

    island
}

/// Apply the island rules to a freshly composed grid, mutating it in place.
///
/// This is a fixed single pass: water pockets below `minimum_water_tiles`
/// are filled in to the next layer up, then land components below
/// `minimum_land_tiles` are submerged. A filled-in pocket is never
/// re-checked against the land threshold.
pub fn partition(grid: &mut Tilemap<u8>, config: &MapConfig) -> IslandPartition {
    // Fill in undersized water pockets.
    for pocket in find_islands(grid, config.back_layer) {
        if pocket.len() < config.minimum_water_tiles {
            for coord in &pocket {
                grid.set(coord.x, coord.y, config.back_layer + 1);
            }
        }
    }

    // Submerge undersized islands; survivors become the authoritative
    // island list in discovery order.
    let mut islands = Vec::new();
    let mut id_map = Tilemap::new_with(grid.width, grid.height, IslandId::NONE);
    let mut next_id = 1u32;

    for tiles in find_islands(grid, config.main_layer) {
        if tiles.len() < config.minimum_land_tiles {
            for coord in &tiles {
                grid.set(coord.x, coord.y, config.main_layer - 1);
            }
        } else {
            let id = IslandId(next_id);
            next_id += 1;
            for coord in &tiles {
                id_map.set(coord.x, coord.y, id);
            }
            islands.push(Island { id, tiles });
        }
    }

    IslandPartition { islands, id_map }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&[u8]]) -> Tilemap<u8> {
        let height = rows.len();
        let width = rows[0].len();
        let mut grid = Tilemap::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                grid.set(x, y, value);
            }
        }
        grid
    }

    fn test_config() -> MapConfig {
        MapConfig {
            minimum_land_tiles: 3,
            minimum_water_tiles: 3,
            ..MapConfig::default()
        }
    }

    #[test]
    fn uniform_grid_is_one_component() {
        let grid: Tilemap<u8> = Tilemap::new(3, 3);
        let islands = find_islands(&grid, 0);
        assert_eq!(islands.len(), 1);
        assert_eq!(islands[0].len(), 9);
    }

    #[test]
    fn diagonal_cells_do_not_connect() {
        let grid = grid_from_rows(&[
            &[1, 0, 0],
            &[0, 1, 0],
            &[0, 0, 1],
        ]);
        assert_eq!(find_islands(&grid, 1).len(), 3);
    }

    #[test]
    fn components_partition_the_target_cells() {
        let grid = grid_from_rows(&[
            &[1, 1, 0, 1],
            &[0, 1, 0, 1],
            &[0, 0, 0, 1],
            &[1, 0, 1, 1],
        ]);
        let islands = find_islands(&grid, 1);

        let mut seen = std::collections::HashSet::new();
        let mut total = 0;
        for island in &islands {
            for coord in island {
                assert!(seen.insert(*coord), "components must be disjoint");
                assert_eq!(*grid.get(coord.x, coord.y), 1);
                total += 1;
            }
        }
        let ones = grid.iter().filter(|(_, _, &v)| v == 1).count();
        assert_eq!(total, ones);
    }

    #[test]
    fn undersized_water_pockets_are_filled_in() {
        // A 2-cell water pocket inside land, below the water threshold.
        let mut grid = grid_from_rows(&[
            &[1, 1, 1, 1, 1],
            &[1, 0, 0, 1, 1],
            &[1, 1, 1, 1, 1],
            &[1, 1, 1, 1, 1],
            &[1, 1, 1, 1, 1],
        ]);
        let partition = partition(&mut grid, &test_config());
        assert_eq!(*grid.get(1, 1), 1);
        assert_eq!(*grid.get(2, 1), 1);
        // The surviving land mass covers the whole grid now.
        assert_eq!(partition.islands.len(), 1);
        assert_eq!(partition.islands[0].size(), 25);
    }

    #[test]
    fn undersized_islands_are_submerged() {
        let mut grid = grid_from_rows(&[
            &[1, 1, 0, 0, 0],
            &[1, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 1],
            &[0, 0, 0, 1, 1],
        ]);
        let config = MapConfig {
            minimum_land_tiles: 4,
            minimum_water_tiles: 1,
            ..MapConfig::default()
        };
        let result = partition(&mut grid, &config);

        // The 3-cell island is gone, the 4-cell island survives.
        assert_eq!(result.islands.len(), 1);
        assert_eq!(result.islands[0].size(), 4);
        assert_eq!(*grid.get(0, 0), 1);
        assert_eq!(*grid.get(4, 3), 0, "submerged cell should be water again");
        assert_eq!(*grid.get(3, 4), 0, "submerged cell should be water again");
    }

    #[test]
    fn island_ids_stay_sequential_beyond_sixteen_bits() {
        // 90000 isolated single-cell islands, far past what a 16-bit id
        // counter could number.
        let mut grid: Tilemap<u8> = Tilemap::new(600, 600);
        for x in (0..600).step_by(2) {
            for y in (0..600).step_by(2) {
                grid.set(x, y, 1);
            }
        }
        let config = MapConfig {
            minimum_land_tiles: 1,
            minimum_water_tiles: 1,
            ..MapConfig::default()
        };
        let result = partition(&mut grid, &config);

        assert_eq!(result.islands.len(), 300 * 300);
        assert_eq!(result.islands[70_000].id, IslandId(70_001));
        assert_eq!(result.islands.last().map(|i| i.id), Some(IslandId(90_000)));
    }

    #[test]
    fn retained_islands_get_sequential_ids_in_discovery_order() {
        let mut grid = grid_from_rows(&[
            &[1, 1, 0, 0, 0, 0],
            &[1, 1, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 1, 1],
            &[0, 0, 0, 0, 1, 1],
            &[0, 0, 0, 0, 0, 0],
        ]);
        let config = MapConfig {
            minimum_land_tiles: 2,
            minimum_water_tiles: 1,
            ..MapConfig::default()
        };
        let result = partition(&mut grid, &config);

        assert_eq!(result.islands.len(), 2);
        assert_eq!(result.islands[0].id, IslandId(1));
        assert_eq!(result.islands[1].id, IslandId(2));
        assert_eq!(*result.id_map.get(0, 0), IslandId(1));
        assert_eq!(*result.id_map.get(4, 3), IslandId(2));
        assert_eq!(*result.id_map.get(2, 2), IslandId::NONE);
        assert_eq!(result.island_at(1, 1).map(|i| i.id), Some(IslandId(1)));
        assert!(result.island_at(2, 2).is_none());
    }

    #[test]
    fn no_retained_island_is_below_threshold() {
        let mut grid = grid_from_rows(&[
            &[1, 0, 1, 1],
            &[0, 0, 1, 1],
            &[1, 0, 0, 0],
            &[1, 1, 0, 0],
        ]);
        let config = MapConfig {
            minimum_land_tiles: 3,
            minimum_water_tiles: 1,
            ..MapConfig::default()
        };
        let result = partition(&mut grid, &config);
        assert!(result.islands.iter().all(|i| i.size() >= 3));
    }

    #[test]
    fn reclassification_is_a_single_pass() {
        // The water fill runs before the land scan, so a filled pocket
        // joins its surrounding land component and lifts it exactly to the
        // threshold here. There is no further iteration after that.
        let mut grid = grid_from_rows(&[
            &[1, 1, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        let config = MapConfig {
            minimum_land_tiles: 9,
            minimum_water_tiles: 2,
            ..MapConfig::default()
        };
        let result = partition(&mut grid, &config);
        // Pocket filled, land now 9 cells, exactly at threshold.
        assert_eq!(result.islands.len(), 1);
        assert_eq!(result.islands[0].size(), 9);
    }
}
