//! ASCII rendering for map previews
//!
//! Turns a layer grid or island partition into text for the terminal. The
//! generation core never calls this; it exists for the CLI and debugging.

use crate::islands::IslandPartition;
use crate::tilemap::Tilemap;

/// Character ramp for layer values.
pub fn layer_char(value: u8) -> char {
    match value {
        0 => '~',
        1 => '.',
        2 => '^',
        3 => '#',
        _ => '@',
    }
}

/// Render the layer grid as one character per cell.
pub fn render_grid(grid: &Tilemap<u8>) -> String {
    let mut out = String::with_capacity((grid.width + 1) * grid.height);
    for y in 0..grid.height {
        for x in 0..grid.width {
            out.push(layer_char(*grid.get(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Render island ids (last digit, to keep one column per cell); cells
/// outside any island show as dots.
pub fn render_islands(partition: &IslandPartition) -> String {
    let map = &partition.id_map;
    let mut out = String::with_capacity((map.width + 1) * map.height);
    for y in 0..map.height {
        for x in 0..map.width {
            let id = *map.get(x, y);
            if id.is_none() {
                out.push('.');
            } else {
                out.push(char::from_digit(id.0 % 10, 10).unwrap_or('?'));
            }
        }
        out.push('\n');
    }
    out
}
