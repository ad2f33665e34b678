//! Layered cellular automaton terrain synthesis
//!
//! Each sub-map starts from random noise on the land layer, gets smoothed
//! into organic blobs by a birth/death automaton, then grows each higher
//! layer on top of the previous one. Higher layers only appear where they
//! are enclosed by the layer below, which is what produces nested island
//! shapes instead of disconnected speckle.

use rand::Rng;

use crate::config::{MapConfig, TerrainLayer};
use crate::tilemap::Tilemap;

/// Birth/death thresholds for the base layer automaton.
const BIRTH_LIMIT: i32 = 4;
const DEATH_LIMIT: i32 = 4;

/// Thresholds for the higher-layer automaton.
const BIRTH_LIMIT_EXTRA: i32 = 4;
const DEATH_LIMIT_EXTRA: i32 = 4;

/// Synthesize one sub-map. `layers` must have passed validation (length
/// at least 2); layer 0 is the background and is never grown itself.
///
/// Every cell holds the highest layer index it has attained, so values
/// stay within `0..layers.len()`.
pub fn synthesize(
    width: usize,
    height: usize,
    layers: &[TerrainLayer],
    rng: &mut impl Rng,
) -> Tilemap<u8> {
    let base = &layers[1];

    // Per-sub-map jitter on the land saturation. The sum is deliberately
    // not reclamped to [0, 100]; out-of-range chances just saturate the
    // strict-less-than draw below.
    let init_chance = base.saturation + rng.gen_range(-base.variation..=base.variation);

    let mut map = Tilemap::new_with(width, height, 0u8);
    for x in 0..width {
        for y in 0..height {
            if rng.gen_range(1..=100) < init_chance {
                map.set(x, y, 1);
            }
        }
    }

    for _ in 0..base.cellular {
        map = smooth_base(&map);
    }

    let mut level: u8 = 1;
    for layer in &layers[2..] {
        seed_growth(&mut map, layer, level, rng);
        for _ in 0..layer.cellular {
            map = smooth_layer(&map, level);
        }
        level += 1;
    }

    map
}

/// Tile `grid_size` x `grid_size` independently synthesized sub-maps into
/// the full grid. Each sub-map draws its own saturation jitter from the
/// sequential rng stream; no blending is applied across block boundaries,
/// so seams at sub-map edges are accepted behavior.
pub fn compose(config: &MapConfig, rng: &mut impl Rng) -> Tilemap<u8> {
    let mut grid = Tilemap::new_with(config.full_width(), config.full_height(), 0u8);

    for i in 0..config.grid_size {
        for j in 0..config.grid_size {
            let sub = synthesize(config.map_width, config.map_height, &config.layers, rng);
            let start_x = i * config.map_width;
            let start_y = j * config.map_height;

            for x in 0..config.map_width {
                for y in 0..config.map_height {
                    grid.set(start_x + x, start_y + y, *sub.get(x, y));
                }
            }
        }
    }

    grid
}

/// One round of the base layer birth/death automaton. Border cells simply
/// have fewer neighbors; there is no wraparound.
fn smooth_base(old: &Tilemap<u8>) -> Tilemap<u8> {
    let mut new = Tilemap::new_with(old.width, old.height, 0u8);

    for x in 0..old.width {
        for y in 0..old.height {
            let mut neighbors = 0i32;
            for dx in -1i32..=1 {
                for dy in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if old.in_bounds(nx, ny) {
                        neighbors += i32::from(*old.get(nx as usize, ny as usize));
                    }
                }
            }

            let alive = *old.get(x, y) == 1;
            if (alive && neighbors >= DEATH_LIMIT) || (!alive && neighbors > BIRTH_LIMIT) {
                new.set(x, y, 1);
            }
        }
    }

    new
}

/// Seed growth of `level + 1` on top of `level`, in place. A cell is only
/// eligible when it sits clear of the border by `distance + 1` and all four
/// diagonal cells at offset `distance` already hold the layer below, i.e.
/// the new growth is enclosed.
fn seed_growth(map: &mut Tilemap<u8>, layer: &TerrainLayer, level: u8, rng: &mut impl Rng) {
    let distance = layer.distance as usize;
    let margin = distance + 1;

    for x in margin..map.width.saturating_sub(margin) {
        for y in margin..map.height.saturating_sub(margin) {
            if *map.get(x, y) != level {
                continue;
            }
            if *map.get(x - distance, y - distance) >= level
                && *map.get(x - distance, y + distance) >= level
                && *map.get(x + distance, y - distance) >= level
                && *map.get(x + distance, y + distance) >= level
                && rng.gen_range(1..=100) < layer.saturation
            {
                map.set(x, y, level + 1);
            }
        }
    }
}

/// One round of the higher-layer automaton. Cells below `level` are frozen.
/// For the rest, the agreement count gets one point per equal neighbor and
/// a bonus point per below-level neighbor when the cell sits on `level`
/// itself, so layer boundaries resist erosion.
fn smooth_layer(old: &Tilemap<u8>, level: u8) -> Tilemap<u8> {
    let mut new = Tilemap::new_with(old.width, old.height, 0u8);

    for x in 0..old.width {
        for y in 0..old.height {
            let value = *old.get(x, y);
            if value < level {
                new.set(x, y, value);
                continue;
            }

            let mut agreement = 0i32;
            for dx in -1i32..=1 {
                for dy in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if old.in_bounds(nx, ny) {
                        let neighbor = *old.get(nx as usize, ny as usize);
                        if neighbor == value {
                            agreement += 1;
                        }
                        if value == level && neighbor < level {
                            agreement += 1;
                        }
                    }
                }
            }

            let next = if (value == level + 1 && agreement > BIRTH_LIMIT_EXTRA)
                || (value == level && agreement < DEATH_LIMIT_EXTRA)
            {
                level + 1
            } else {
                level
            };
            new.set(x, y, next);
        }
    }

    new
}
