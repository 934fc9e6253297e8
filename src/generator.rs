//! Map generation pipeline
//!
//! Runs the passes in a fixed order over one grid and one random stream:
//! grid, regions, land, erosion, climate, rivers, temperature, biomes.

use log::info;
use serde::{Deserialize, Serialize};

use crate::biomes::BiomeClassifier;
use crate::climate::{ClimateData, ClimateSimulator};
use crate::config::MapConfig;
use crate::erosion::{ErosionReport, ErosionSimulator};
use crate::error::Result;
use crate::grid::Grid;
use crate::regions::{RegionPartitioner, RegionRect};
use crate::rivers::{RiverBuilder, RiverReport};
use crate::seeds::MapSeed;
use crate::tectonics::{LandReport, TerrainGenerator};
use crate::timed;

/// Pipeline passes, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    Grid,
    Regions,
    Land,
    Erosion,
    Climate,
    Rivers,
    Temperature,
    Biomes,
}

impl GenerationStage {
    pub const ALL: [GenerationStage; 8] = [
        GenerationStage::Grid,
        GenerationStage::Regions,
        GenerationStage::Land,
        GenerationStage::Erosion,
        GenerationStage::Climate,
        GenerationStage::Rivers,
        GenerationStage::Temperature,
        GenerationStage::Biomes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GenerationStage::Grid => "Grid",
            GenerationStage::Regions => "Regions",
            GenerationStage::Land => "Land",
            GenerationStage::Erosion => "Erosion",
            GenerationStage::Climate => "Climate",
            GenerationStage::Rivers => "Rivers",
            GenerationStage::Temperature => "Temperature",
            GenerationStage::Biomes => "Biomes",
        }
    }
}

/// What each pass achieved against its budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub land: LandReport,
    pub erosion: ErosionReport,
    pub rivers: RiverReport,
    /// Cells at or above the water level once every pass has run
    pub final_land_cells: usize,
}

/// A finished map.
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    pub grid: Grid,
    /// Final climate buffer, one entry per cell
    pub climate: Vec<ClimateData>,
    pub seed: MapSeed,
    pub regions: Vec<RegionRect>,
    pub report: GenerationReport,
}

#[derive(Clone, Debug, Default)]
pub struct MapGenerator {
    config: MapConfig,
}

impl MapGenerator {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<GeneratedMap> {
        self.generate_with_progress(|_| {})
    }

    /// Generate a map, calling `progress` right before each pass starts.
    pub fn generate_with_progress<F>(&self, mut progress: F) -> Result<GeneratedMap>
    where
        F: FnMut(GenerationStage),
    {
        let config = &self.config;
        let seed = MapSeed::resolve(config.use_fixed_seed, config.seed);
        let mut rng = seed.rng();
        info!(
            "Generating {}x{} map (wrapping: {}) with seed {}",
            config.width(),
            config.height(),
            config.wrapping,
            seed
        );

        progress(GenerationStage::Grid);
        let mut grid = timed!("Grid", Grid::new(config.width(), config.height(), config.wrapping));
        for cell in grid.cells_mut() {
            cell.water_level = config.water_level();
        }

        progress(GenerationStage::Regions);
        let regions = RegionPartitioner::new(config, &grid).partition(&mut rng);

        progress(GenerationStage::Land);
        let land = timed!(
            "Land",
            TerrainGenerator::new(config, grid.len()).create_land(&mut grid, &regions, &mut rng)
        );

        progress(GenerationStage::Erosion);
        let erosion = timed!("Erosion", ErosionSimulator::new(config).run(&mut grid, &mut rng))?;

        progress(GenerationStage::Climate);
        let climate_simulator = ClimateSimulator::new(config);
        let mut climate = timed!("Climate", climate_simulator.run(&grid));

        progress(GenerationStage::Rivers);
        let rivers = timed!(
            "Rivers",
            RiverBuilder::new(config).create_rivers(&mut grid, &climate, land.actual_land_cells, &mut rng)
        )?;

        progress(GenerationStage::Temperature);
        climate_simulator.assign_temperatures(&grid, &mut climate, &mut rng);

        progress(GenerationStage::Biomes);
        timed!("Biomes", BiomeClassifier::new(config).classify(&mut grid, &climate));

        let water_level = config.water_level();
        let final_land_cells = grid.cells().iter().filter(|c| c.elevation >= water_level).count();
        info!(
            "Generated {} cells: {} land of {} requested, {} rivers, {} lakes",
            grid.len(),
            final_land_cells,
            land.requested_land_cells,
            rivers.rivers,
            rivers.lakes
        );

        Ok(GeneratedMap {
            grid,
            climate,
            seed,
            regions,
            report: GenerationReport {
                land,
                erosion,
                rivers,
                final_land_cells,
            },
        })
    }
}

/// Generate a map from `config` in one call.
pub fn generate_map(config: &MapConfig) -> Result<GeneratedMap> {
    MapGenerator::new(config.clone()).generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_visits_every_stage_in_order() {
        let config = MapConfig::with_size(20, 15).with_seed(3);
        let mut stages = Vec::new();
        let map = MapGenerator::new(config)
            .generate_with_progress(|stage| stages.push(stage))
            .unwrap();
        assert_eq!(stages, GenerationStage::ALL);
        assert_eq!(map.seed.value(), 3);
    }

    #[test]
    fn test_cells_take_config_water_level() {
        let mut config = MapConfig::with_size(20, 15).with_seed(9);
        config.set_water_level(2).set_river_percentage(0);
        let map = generate_map(&config).unwrap();
        assert!(map.grid.cells().iter().all(|c| c.water_level == 2));
        assert!(map.grid.cells().iter().all(|c| !c.explored), "exploration is left to consumers");
        assert_eq!(map.climate.len(), map.grid.len());
    }
}
