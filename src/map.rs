//! Generation pipeline and map data container
//!
//! Bundles everything one generation pass produces so it can be handed to
//! consumers (renderer, instantiator, persistence) as a single snapshot.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, MapConfig};
use crate::islands::{self, Island, IslandId, IslandPartition};
use crate::objects::{self, ObjectRule, Placement};
use crate::seeds::MapSeeds;
use crate::terrain;
use crate::tilemap::Tilemap;

/// All data produced by one generation pass.
pub struct MapData {
    /// Seeds used for generation (allows recreation)
    pub seeds: MapSeeds,
    /// Configuration the map was generated with
    pub config: MapConfig,
    /// Final layer grid, after island reclassification
    pub grid: Tilemap<u8>,
    /// Retained islands in discovery order
    pub islands: Vec<Island>,
    /// Per-cell island id (0 = no island)
    pub island_map: Tilemap<IslandId>,
    /// Decided object placements
    pub placements: Vec<Placement>,
}

impl MapData {
    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Which island a cell belongs to, if any.
    pub fn island_at(&self, x: usize, y: usize) -> Option<&Island> {
        let id = *self.island_map.get(x, y);
        if id.is_none() {
            return None;
        }
        self.islands.iter().find(|island| island.id == id)
    }
}

/// Run one full generation pass: validate, synthesize and compose the
/// terrain grid, partition and reclassify islands, then decide object
/// placements. Synchronous and atomic; callers serialize their requests.
pub fn generate(
    config: &MapConfig,
    rules: &[ObjectRule],
    seeds: MapSeeds,
) -> Result<MapData, ConfigError> {
    config.validate()?;

    let mut terrain_rng = ChaCha8Rng::seed_from_u64(seeds.terrain);
    let mut grid = terrain::compose(config, &mut terrain_rng);

    let IslandPartition { islands, id_map } = islands::partition(&mut grid, config);

    let mut object_rng = ChaCha8Rng::seed_from_u64(seeds.objects);
    let placements = objects::place(&grid, rules, &mut object_rng);

    Ok(MapData {
        seeds,
        config: config.clone(),
        grid,
        islands,
        island_map: id_map,
        placements,
    })
}
