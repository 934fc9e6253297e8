//! A single hex tile and its terrain types.

use serde::{Deserialize, Serialize};

use crate::coords::HexCoordinate;

/// Elevation of a cell that no pass has touched yet.
pub const UNINITIALIZED_ELEVATION: i32 = i32::MIN;

/// Highest urban, farm or plant level.
pub const MAX_FEATURE_LEVEL: u8 = 3;

/// Terrain texture classes, indexed the way the renderer's texture array is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    /// Also the "desert" placeholder in the biome matrix.
    #[default]
    Sand,
    Grass,
    Mud,
    Stone,
    Snow,
}

impl Terrain {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Terrain> {
        match index {
            0 => Some(Terrain::Sand),
            1 => Some(Terrain::Grass),
            2 => Some(Terrain::Mud),
            3 => Some(Terrain::Stone),
            4 => Some(Terrain::Snow),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Terrain::Sand => "Sand",
            Terrain::Grass => "Grass",
            Terrain::Mud => "Mud",
            Terrain::Stone => "Stone",
            Terrain::Snow => "Snow",
        }
    }
}

/// One hex tile. Owned by exactly one [`crate::grid::Grid`]; `index` is its
/// position in the grid's dense cell array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    index: usize,
    coordinate: HexCoordinate,
    pub elevation: i32,
    pub water_level: i32,
    urban_level: u8,
    farm_level: u8,
    plant_level: u8,
    pub terrain: Terrain,
    pub special_index: u8,
    /// Fog-of-war state, owned by map consumers. Generation never touches it.
    pub explored: bool,
    pub explorable: bool,
}

impl Cell {
    pub fn new(index: usize, coordinate: HexCoordinate) -> Self {
        Self {
            index,
            coordinate,
            elevation: UNINITIALIZED_ELEVATION,
            water_level: 0,
            urban_level: 0,
            farm_level: 0,
            plant_level: 0,
            terrain: Terrain::default(),
            special_index: 0,
            explored: false,
            explorable: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn coordinate(&self) -> HexCoordinate {
        self.coordinate
    }

    /// Elevation visible from above: the water surface if submerged.
    pub fn view_elevation(&self) -> i32 {
        self.elevation.max(self.water_level)
    }

    pub fn is_underwater(&self) -> bool {
        self.water_level > self.elevation
    }

    pub fn urban_level(&self) -> u8 {
        self.urban_level
    }

    pub fn farm_level(&self) -> u8 {
        self.farm_level
    }

    pub fn plant_level(&self) -> u8 {
        self.plant_level
    }

    pub fn set_urban_level(&mut self, level: u8) {
        self.urban_level = level.min(MAX_FEATURE_LEVEL);
    }

    pub fn set_farm_level(&mut self, level: u8) {
        self.farm_level = level.min(MAX_FEATURE_LEVEL);
    }

    pub fn set_plant_level(&mut self, level: u8) {
        self.plant_level = level.min(MAX_FEATURE_LEVEL);
    }
}
