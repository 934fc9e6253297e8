//! Terrain and vegetation classification
//!
//! Land cells look up a (terrain, plant level) pair from a 4x4 matrix indexed
//! by temperature band and moisture band, then get elevation overrides.
//! Underwater cells are classified by depth and by how their shore meets the
//! surrounding land.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cell::{Terrain, MAX_FEATURE_LEVEL};
use crate::climate::ClimateData;
use crate::config::MapConfig;
use crate::grid::Grid;

/// Upper bounds of the first three temperature bands
pub const TEMPERATURE_BANDS: [f32; 3] = [0.1, 0.3, 0.6];

/// Upper bounds of the first three moisture bands
pub const MOISTURE_BANDS: [f32; 3] = [0.12, 0.28, 0.85];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biome {
    pub terrain: Terrain,
    pub plant: u8,
}

impl Biome {
    const fn new(terrain: Terrain, plant: u8) -> Self {
        Self { terrain, plant }
    }
}

/// Rows are temperature bands (cold to hot), columns moisture bands (dry to wet).
#[rustfmt::skip]
pub const BIOMES: [Biome; 16] = {
    use Terrain::*;
    [
        Biome::new(Sand, 0), Biome::new(Snow, 0),  Biome::new(Snow, 0),  Biome::new(Snow, 0),
        Biome::new(Sand, 0), Biome::new(Mud, 0),   Biome::new(Mud, 1),   Biome::new(Mud, 2),
        Biome::new(Sand, 0), Biome::new(Grass, 0), Biome::new(Grass, 1), Biome::new(Grass, 2),
        Biome::new(Sand, 0), Biome::new(Grass, 1), Biome::new(Grass, 2), Biome::new(Grass, 3),
    ]
};

/// Index of the first band whose bound exceeds `value`, or 3 if none does.
fn band(value: f32, bands: &[f32; 3]) -> usize {
    bands.iter().position(|&bound| value < bound).unwrap_or(bands.len())
}

#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    water_level: i32,
    elevation_max: i32,
}

impl BiomeClassifier {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            water_level: config.water_level(),
            elevation_max: config.elevation_max(),
        }
    }

    /// Elevation from which sandy desert turns to rock.
    pub fn rock_desert_elevation(&self) -> i32 {
        self.elevation_max - (self.elevation_max - self.water_level) / 2
    }

    /// Terrain and plant level for one cell. Depends only on the grid's
    /// elevations, water levels and rivers plus the cell's climate.
    pub fn classify_cell(&self, grid: &Grid, cell: usize, climate: &ClimateData) -> Biome {
        let here = &grid[cell];
        if !here.is_underwater() {
            let t = band(climate.temperature, &TEMPERATURE_BANDS);
            let m = band(climate.moisture, &MOISTURE_BANDS);
            let mut biome = BIOMES[t * 4 + m];

            if biome.terrain == Terrain::Sand {
                if here.elevation >= self.rock_desert_elevation() {
                    biome.terrain = Terrain::Stone;
                }
            } else if here.elevation == self.elevation_max {
                biome.terrain = Terrain::Snow;
            }

            if biome.terrain == Terrain::Snow {
                biome.plant = 0;
            } else if biome.plant < MAX_FEATURE_LEVEL && grid.rivers().has_river(cell) {
                biome.plant += 1;
            }
            return biome;
        }

        let mut terrain = if here.elevation == self.water_level - 1 {
            // Shore shape is measured against this cell's water surface, not
            // its bed, so elevation edge kinds do not apply here.
            let (mut cliffs, mut slopes) = (0, 0);
            for neighbor in grid.neighbors(cell) {
                let delta = grid[neighbor].elevation - here.water_level;
                if delta == 0 {
                    slopes += 1;
                } else if delta > 0 {
                    cliffs += 1;
                }
            }
            if cliffs + slopes > 3 {
                Terrain::Grass
            } else if cliffs > 0 {
                Terrain::Stone
            } else if slopes > 0 {
                Terrain::Sand
            } else {
                Terrain::Grass
            }
        } else if here.elevation >= self.water_level {
            Terrain::Grass
        } else if here.elevation < 0 {
            Terrain::Stone
        } else {
            Terrain::Mud
        };

        if terrain == Terrain::Grass && climate.temperature < TEMPERATURE_BANDS[0] {
            terrain = Terrain::Mud;
        }
        Biome::new(terrain, 0)
    }

    /// Classify every cell in place.
    pub fn classify(&self, grid: &mut Grid, climate: &[ClimateData]) {
        let biomes: Vec<Biome> = (0..grid.len())
            .map(|cell| self.classify_cell(grid, cell, &climate[cell]))
            .collect();
        for (cell, biome) in grid.cells_mut().iter_mut().zip(biomes) {
            cell.terrain = biome.terrain;
            cell.set_plant_level(biome.plant);
        }

        let mut counts = [0usize; 5];
        for cell in grid.cells() {
            counts[cell.terrain.index() as usize] += 1;
        }
        debug!(
            "Terrain: sand {}, grass {}, mud {}, stone {}, snow {}",
            counts[0], counts[1], counts[2], counts[3], counts[4]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Direction;

    fn climate(temperature: f32, moisture: f32) -> ClimateData {
        ClimateData {
            temperature,
            moisture,
            clouds: 0.0,
        }
    }

    fn flat_land(elevation: i32) -> Grid {
        let mut grid = Grid::new(5, 5, false);
        for cell in grid.cells_mut() {
            cell.elevation = elevation;
            cell.water_level = 3;
        }
        grid
    }

    #[test]
    fn test_bands() {
        assert_eq!(band(0.05, &TEMPERATURE_BANDS), 0);
        assert_eq!(band(0.1, &TEMPERATURE_BANDS), 1);
        assert_eq!(band(0.59, &TEMPERATURE_BANDS), 2);
        assert_eq!(band(1.0, &TEMPERATURE_BANDS), 3);
        assert_eq!(band(0.9, &MOISTURE_BANDS), 3);
    }

    #[test]
    fn test_matrix_lookup() {
        let classifier = BiomeClassifier::new(&MapConfig::default());
        let grid = flat_land(4);
        let warm_wet = classifier.classify_cell(&grid, 12, &climate(0.7, 0.9));
        assert_eq!(warm_wet, Biome::new(Terrain::Grass, 3));

        let cold = classifier.classify_cell(&grid, 12, &climate(0.05, 0.5));
        assert_eq!(cold, Biome::new(Terrain::Snow, 0));

        let temperate_dry = classifier.classify_cell(&grid, 12, &climate(0.2, 0.05));
        assert_eq!(temperate_dry, Biome::new(Terrain::Sand, 0));
    }

    #[test]
    fn test_elevation_overrides() {
        let classifier = BiomeClassifier::new(&MapConfig::default());
        assert_eq!(classifier.rock_desert_elevation(), 6);

        let high_desert = flat_land(6);
        assert_eq!(
            classifier.classify_cell(&high_desert, 12, &climate(0.7, 0.05)).terrain,
            Terrain::Stone
        );

        let peak = flat_land(8);
        assert_eq!(
            classifier.classify_cell(&peak, 12, &climate(0.7, 0.9)),
            Biome::new(Terrain::Snow, 0)
        );
    }

    #[test]
    fn test_river_adds_plants_up_to_cap() {
        let classifier = BiomeClassifier::new(&MapConfig::default());
        let mut grid = flat_land(4);
        assert!(grid.set_outgoing_river(12, Direction::E));

        let grassland = classifier.classify_cell(&grid, 12, &climate(0.7, 0.2));
        assert_eq!(grassland, Biome::new(Terrain::Grass, 2));
        let jungle = classifier.classify_cell(&grid, 12, &climate(0.7, 0.9));
        assert_eq!(jungle.plant, 3);
    }

    #[test]
    fn test_underwater_terrain() {
        let classifier = BiomeClassifier::new(&MapConfig::default());
        let warm = climate(0.7, 1.0);

        // Shallow shore (elevation 2) surrounded by land at the water level
        let mut shore = flat_land(3);
        shore[12].elevation = 2;
        assert_eq!(classifier.classify_cell(&shore, 12, &warm).terrain, Terrain::Grass);

        // Same shore but only two neighbours touch the surface
        let mut beach = flat_land(1);
        beach[12].elevation = 2;
        for neighbor in beach.neighbors(12).take(2).collect::<Vec<_>>() {
            beach[neighbor].elevation = 3;
        }
        assert_eq!(classifier.classify_cell(&beach, 12, &warm).terrain, Terrain::Sand);

        let deep = flat_land(-1);
        assert_eq!(classifier.classify_cell(&deep, 12, &warm).terrain, Terrain::Stone);
        let shallow = flat_land(0);
        assert_eq!(classifier.classify_cell(&shallow, 12, &warm).terrain, Terrain::Mud);

        let mut cold_shore = flat_land(3);
        cold_shore[12].elevation = 2;
        assert_eq!(
            classifier.classify_cell(&cold_shore, 12, &climate(0.05, 1.0)).terrain,
            Terrain::Mud
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = BiomeClassifier::new(&MapConfig::default());
        let mut a = flat_land(4);
        let data: Vec<ClimateData> = (0..a.len())
            .map(|i| climate(i as f32 / 25.0, 1.0 - i as f32 / 25.0))
            .collect();
        let mut b = a.clone();
        classifier.classify(&mut a, &data);
        classifier.classify(&mut b, &data);
        assert_eq!(a.cells(), b.cells());
    }
}
