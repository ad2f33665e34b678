//! Map generation configuration and validation
//!
//! All tunables for a generation pass live here. Validation is performed
//! up front so the generation pipeline itself never has to guard against
//! malformed input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One terrain tier in the ordered layer stack. Index 0 is the background
/// layer and is never grown itself; it is the fallback every other layer
/// sits on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TerrainLayer {
    /// Chance (percent, 0-100) for a cell to appear on this layer.
    pub saturation: i32,
    /// Minimum margin (0-5) from this layer to the edge of the layer below.
    /// New growth must also be enclosed by the layer below at this offset
    /// on all four corners.
    pub distance: i32,
    /// Symmetric jitter (0-10) applied to saturation per generated sub-map.
    pub variation: i32,
    /// Number of cellular automaton smoothing rounds for this layer.
    pub cellular: u32,
}

impl TerrainLayer {
    pub fn new(saturation: i32, distance: i32, variation: i32, cellular: u32) -> Self {
        Self {
            saturation,
            distance,
            variation,
            cellular,
        }
    }
}

/// Full configuration for one map generation pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// Size of the sub-map grid, e.g. 2 = a 2x2 grid of sub-maps.
    pub grid_size: usize,
    /// Width of one sub-map in cells.
    pub map_width: usize,
    /// Height of one sub-map in cells.
    pub map_height: usize,
    /// Ordered terrain layers, background first. At least 2 required.
    pub layers: Vec<TerrainLayer>,
    /// Minimum number of cells for a land island to survive.
    pub minimum_land_tiles: usize,
    /// Minimum number of cells for a water pocket to survive.
    pub minimum_water_tiles: usize,
    /// Layer value treated as land for island analysis.
    pub main_layer: u8,
    /// Layer value treated as water for island analysis.
    pub back_layer: u8,
}

impl MapConfig {
    /// Full grid width in cells.
    pub fn full_width(&self) -> usize {
        self.grid_size * self.map_width
    }

    /// Full grid height in cells.
    pub fn full_height(&self) -> usize {
        self.grid_size * self.map_height
    }

    /// Check the configuration before any generation work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.len() < 2 {
            return Err(ConfigError::NotEnoughLayers(self.layers.len()));
        }
        // Cell values are u8 layer indices, so more than 256 layers could
        // never be represented in the grid.
        if self.layers.len() > 256 {
            return Err(ConfigError::TooManyLayers(self.layers.len()));
        }
        if self.grid_size < 1 || self.grid_size > 4 {
            return Err(ConfigError::GridSizeOutOfRange(self.grid_size));
        }
        if self.map_width == 0 || self.map_height == 0 {
            return Err(ConfigError::EmptyMapSize);
        }
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.saturation < 0 || layer.saturation > 100 {
                return Err(ConfigError::LayerOutOfRange {
                    layer: index,
                    field: "saturation",
                });
            }
            if layer.distance < 0 || layer.distance > 5 {
                return Err(ConfigError::LayerOutOfRange {
                    layer: index,
                    field: "distance",
                });
            }
            if layer.variation < 0 || layer.variation > 10 {
                return Err(ConfigError::LayerOutOfRange {
                    layer: index,
                    field: "variation",
                });
            }
        }
        // Island analysis rewrites cells to back_layer + 1 and main_layer - 1,
        // so both must land on real layers.
        if self.main_layer == 0 || self.main_layer as usize >= self.layers.len() {
            return Err(ConfigError::LayerRoleInvalid("main_layer"));
        }
        if self.back_layer as usize + 1 >= self.layers.len() {
            return Err(ConfigError::LayerRoleInvalid("back_layer"));
        }
        Ok(())
    }

    /// Non-fatal configuration oddities worth reporting to the user.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(base) = self.layers.first() {
            if base.saturation != 0 {
                warnings.push("first layer is always fully saturated".to_string());
            }
        }
        warnings
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            grid_size: 2,
            map_width: 48,
            map_height: 48,
            layers: vec![
                // Background water: never grown, fully saturated fallback.
                TerrainLayer::new(0, 0, 0, 0),
                // Land mass, smoothed hard for organic coastlines.
                TerrainLayer::new(48, 0, 3, 10),
                // Forest on top of land, enclosed by a 1-cell margin.
                TerrainLayer::new(60, 1, 2, 2),
            ],
            minimum_land_tiles: 12,
            minimum_water_tiles: 8,
            main_layer: 1,
            back_layer: 0,
        }
    }
}

/// Errors from configuration validation
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    NotEnoughLayers(usize),
    TooManyLayers(usize),
    GridSizeOutOfRange(usize),
    EmptyMapSize,
    LayerOutOfRange {
        layer: usize,
        field: &'static str,
    },
    LayerRoleInvalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotEnoughLayers(n) => {
                write!(f, "map generator needs at least 2 terrain layers, got {}", n)
            }
            ConfigError::TooManyLayers(n) => {
                write!(f, "map generator supports at most 256 terrain layers, got {}", n)
            }
            ConfigError::GridSizeOutOfRange(n) => {
                write!(f, "grid size must be between 1 and 4, got {}", n)
            }
            ConfigError::EmptyMapSize => write!(f, "sub-map dimensions must be nonzero"),
            ConfigError::LayerOutOfRange { layer, field } => {
                write!(f, "layer {} has {} out of range", layer, field)
            }
            ConfigError::LayerRoleInvalid(role) => {
                write!(f, "{} does not refer to a valid layer", role)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_fewer_than_two_layers() {
        let mut config = MapConfig::default();
        config.layers.truncate(1);
        assert_eq!(config.validate(), Err(ConfigError::NotEnoughLayers(1)));
    }

    #[test]
    fn rejects_more_layers_than_the_cell_type_can_hold() {
        let mut config = MapConfig::default();
        config.layers = vec![TerrainLayer::new(0, 0, 0, 0); 257];
        assert_eq!(config.validate(), Err(ConfigError::TooManyLayers(257)));
    }

    #[test]
    fn rejects_grid_size_out_of_range() {
        let mut config = MapConfig::default();
        config.grid_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::GridSizeOutOfRange(0)));
        config.grid_size = 5;
        assert_eq!(config.validate(), Err(ConfigError::GridSizeOutOfRange(5)));
    }

    #[test]
    fn rejects_empty_map_size() {
        let mut config = MapConfig::default();
        config.map_width = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyMapSize));
    }

    #[test]
    fn rejects_layer_field_out_of_range() {
        let mut config = MapConfig::default();
        config.layers[1].saturation = 101;
        assert_eq!(
            config.validate(),
            Err(ConfigError::LayerOutOfRange {
                layer: 1,
                field: "saturation"
            })
        );
    }

    #[test]
    fn rejects_invalid_layer_roles() {
        let mut config = MapConfig::default();
        config.main_layer = 0;
        assert_eq!(config.validate(), Err(ConfigError::LayerRoleInvalid("main_layer")));

        let mut config = MapConfig::default();
        config.back_layer = 2;
        assert_eq!(config.validate(), Err(ConfigError::LayerRoleInvalid("back_layer")));
    }

    #[test]
    fn warns_on_saturated_base_layer() {
        let mut config = MapConfig::default();
        assert!(config.warnings().is_empty());
        config.layers[0].saturation = 50;
        assert_eq!(config.warnings().len(), 1);
    }
}
