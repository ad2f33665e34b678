//! PNG preview export
//!
//! Paints the layer grid into an image, one colored block per cell. Like
//! the ASCII preview this sits outside the generation core; the core only
//! hands over the finished grid.

use std::error::Error;
use std::path::Path;

use image::{Rgb, RgbImage};

use crate::tilemap::Tilemap;

/// Color for a layer value.
pub fn layer_color(value: u8) -> Rgb<u8> {
    match value {
        0 => Rgb([52, 96, 168]),   // water
        1 => Rgb([118, 168, 84]),  // land
        2 => Rgb([56, 112, 48]),   // forest
        3 => Rgb([140, 140, 132]), // rock
        _ => Rgb([220, 220, 220]),
    }
}

/// Write the grid as a PNG, each cell scaled to a `scale` x `scale` block.
pub fn export_png(grid: &Tilemap<u8>, path: &Path, scale: u32) -> Result<(), Box<dyn Error>> {
    let scale = scale.max(1);
    let img = RgbImage::from_fn(
        grid.width as u32 * scale,
        grid.height as u32 * scale,
        |px, py| layer_color(*grid.get((px / scale) as usize, (py / scale) as usize)),
    );
    img.save(path)?;
    Ok(())
}
