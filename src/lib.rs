//! Island map generation library
//!
//! Procedurally synthesizes a layered 2D terrain grid with cellular
//! automata, partitions it into islands, and decides object placements.
//! Re-exports modules for use by the CLI binary and tools.

pub mod ascii;
pub mod config;
pub mod islands;
pub mod map;
pub mod objects;
pub mod persistence;
pub mod render;
pub mod seeds;
pub mod terrain;
pub mod tilemap;
