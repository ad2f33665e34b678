//! Map file save/load
//!
//! Owns the on-disk layout: an explicit versioned schema (dimensions plus a
//! flat row-major cell array) serialized as JSON. Save file names are made
//! unique with a counter and a timestamp; running out of candidate names is
//! reported as an error, never a panic.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

/// Current map file schema version.
pub const MAP_FILE_VERSION: u32 = 1;

/// Bound on unique-name attempts before save gives up.
const MAX_NAME_ATTEMPTS: u32 = 512;

/// On-disk map schema.
#[derive(Serialize, Deserialize)]
pub struct MapFile {
    pub version: u32,
    pub width: usize,
    pub height: usize,
    /// Row-major cell values.
    pub cells: Vec<u8>,
}

/// Errors from map persistence
#[derive(Debug)]
pub enum MapFileError {
    NotFound(PathBuf),
    NameExhausted,
    UnsupportedVersion(u32),
    CorruptFile(String),
    Io(std::io::Error),
    Format(serde_json::Error),
}

impl fmt::Display for MapFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapFileError::NotFound(path) => write!(f, "map file not found: {}", path.display()),
            MapFileError::NameExhausted => {
                write!(f, "could not find a free map file name after {} attempts", MAX_NAME_ATTEMPTS)
            }
            MapFileError::UnsupportedVersion(v) => {
                write!(f, "unsupported map file version {}", v)
            }
            MapFileError::CorruptFile(reason) => write!(f, "corrupt map file: {}", reason),
            MapFileError::Io(e) => write!(f, "map file I/O error: {}", e),
            MapFileError::Format(e) => write!(f, "map file format error: {}", e),
        }
    }
}

impl std::error::Error for MapFileError {}

impl From<std::io::Error> for MapFileError {
    fn from(e: std::io::Error) -> Self {
        MapFileError::Io(e)
    }
}

impl From<serde_json::Error> for MapFileError {
    fn from(e: serde_json::Error) -> Self {
        MapFileError::Format(e)
    }
}

/// Save a grid into `dir` under a generated unique name. Creates the
/// directory if needed and returns the written path.
pub fn save_map(grid: &Tilemap<u8>, dir: &Path) -> Result<PathBuf, MapFileError> {
    fs::create_dir_all(dir)?;
    let path = unique_map_path(dir)?;

    let data = MapFile {
        version: MAP_FILE_VERSION,
        width: grid.width,
        height: grid.height,
        cells: grid.cells().to_vec(),
    };

    let file = File::create(&path)?;
    serde_json::to_writer(BufWriter::new(file), &data)?;
    Ok(path)
}

/// Load a grid from a map file written by [`save_map`].
pub fn load_map(path: &Path) -> Result<Tilemap<u8>, MapFileError> {
    if !path.exists() {
        return Err(MapFileError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let data: MapFile = serde_json::from_reader(BufReader::new(file))?;

    if data.version != MAP_FILE_VERSION {
        return Err(MapFileError::UnsupportedVersion(data.version));
    }

    Tilemap::from_cells(data.width, data.height, data.cells)
        .ok_or_else(|| MapFileError::CorruptFile("cell count does not match dimensions".to_string()))
}

/// Pick an unused file name with an iterative bounded retry, counter plus
/// timestamp, e.g. `map3-0829_141502.json`.
fn unique_map_path(dir: &Path) -> Result<PathBuf, MapFileError> {
    let stamp = Local::now().format("%m%d_%H%M%S");
    for count in 0..MAX_NAME_ATTEMPTS {
        let candidate = dir.join(format!("map{}-{}.json", count, stamp));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(MapFileError::NameExhausted)
}
