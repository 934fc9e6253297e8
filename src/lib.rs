//! Hex map generation library
//!
//! Builds a hex grid, raises landmasses, erodes them, runs a climate model,
//! carves rivers and lakes, and classifies terrain. Re-exports modules for use
//! by binaries and tools.

pub mod ascii;
pub mod biomes;
pub mod cell;
pub mod climate;
pub mod config;
pub mod coords;
pub mod erosion;
pub mod error;
pub mod export;
pub mod generator;
pub mod graphs;
pub mod grid;
pub mod regions;
pub mod rivers;
pub mod seeds;
pub mod tectonics;
pub mod util;

pub use cell::{Cell, Terrain};
pub use climate::ClimateData;
pub use config::{Hemisphere, MapConfig};
pub use coords::{Direction, HexCoordinate};
pub use error::{MapError, Result};
pub use generator::{generate_map, GeneratedMap, GenerationReport, GenerationStage, MapGenerator};
pub use grid::Grid;
pub use seeds::MapSeed;
