//! Climate simulation
//!
//! Moves water between cells over a fixed number of cycles: water evaporates
//! into clouds, clouds rain out, drift with the wind and are squeezed out by
//! high ground, and surface moisture runs off downhill or seeps across flat
//! ground. Temperature is computed once afterwards from latitude and altitude.

use log::debug;
use noise::{NoiseFn, Perlin, Seedable};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Hemisphere, MapConfig};
use crate::coords::Direction;
use crate::grid::Grid;

/// Number of simulation cycles
pub const CLIMATE_CYCLES: usize = 40;

/// Noise channels the temperature jitter can be drawn from
const JITTER_CHANNELS: u32 = 4;

/// World-space scale applied to cell positions before sampling jitter noise
const JITTER_SCALE: f64 = 0.1 * 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateData {
    pub clouds: f32,
    pub moisture: f32,
    pub temperature: f32,
}

#[derive(Clone, Debug)]
pub struct ClimateSimulator {
    evaporation_factor: f32,
    precipitation_factor: f32,
    runoff_factor: f32,
    seepage_factor: f32,
    wind_direction: Direction,
    wind_strength: f32,
    starting_moisture: f32,
    elevation_max: i32,
    water_level: i32,
    hemisphere: Hemisphere,
    low_temperature: f32,
    high_temperature: f32,
    temperature_jitter: f32,
}

impl ClimateSimulator {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            evaporation_factor: config.evaporation_factor(),
            precipitation_factor: config.precipitation_factor(),
            runoff_factor: config.runoff_factor(),
            seepage_factor: config.seepage_factor(),
            wind_direction: config.wind_direction,
            wind_strength: config.wind_strength(),
            starting_moisture: config.starting_moisture(),
            elevation_max: config.elevation_max(),
            water_level: config.water_level(),
            hemisphere: config.hemisphere,
            low_temperature: config.low_temperature(),
            high_temperature: config.high_temperature(),
            temperature_jitter: config.temperature_jitter(),
        }
    }

    /// Run all cycles and return the final per-cell climate.
    pub fn run(&self, grid: &Grid) -> Vec<ClimateData> {
        self.run_cycles(grid, CLIMATE_CYCLES, |_, _| {})
    }

    /// Run `cycles` cycles, handing each finished buffer to `inspect`.
    pub fn run_cycles<F>(&self, grid: &Grid, cycles: usize, mut inspect: F) -> Vec<ClimateData>
    where
        F: FnMut(usize, &[ClimateData]),
    {
        let initial = ClimateData {
            moisture: self.starting_moisture,
            ..Default::default()
        };
        let mut current = vec![initial; grid.len()];
        let mut next = vec![ClimateData::default(); grid.len()];

        for cycle in 0..cycles {
            for cell in 0..grid.len() {
                self.evolve(grid, cell, &mut current, &mut next);
            }
            for data in next.iter_mut() {
                data.clouds = data.clouds.clamp(0.0, 1.0);
                data.moisture = data.moisture.clamp(0.0, 1.0);
            }
            std::mem::swap(&mut current, &mut next);
            inspect(cycle, &current);
        }

        let mean_moisture = current.iter().map(|c| c.moisture).sum::<f32>() / current.len().max(1) as f32;
        debug!("Climate settled after {} cycles, mean moisture {:.3}", cycles, mean_moisture);
        current
    }

    /// One cell's share of a cycle. Reads and clears `current[cell]`, writes
    /// into `next` for the cell and its neighbours.
    fn evolve(&self, grid: &Grid, cell: usize, current: &mut [ClimateData], next: &mut [ClimateData]) {
        let here = &grid[cell];
        let mut climate = current[cell];

        if here.is_underwater() {
            climate.moisture = 1.0;
            climate.clouds += self.evaporation_factor;
        } else {
            let evaporation = climate.moisture * self.evaporation_factor;
            climate.moisture -= evaporation;
            climate.clouds += evaporation;
        }

        let precipitation = climate.clouds * self.precipitation_factor;
        climate.clouds -= precipitation;
        climate.moisture += precipitation;

        let cloud_max = 1.0 - here.view_elevation() as f32 / (self.elevation_max as f32 + 1.0);
        if climate.clouds > cloud_max {
            climate.moisture += climate.clouds - cloud_max;
            climate.clouds = cloud_max;
        }

        let main_dispersal = self.wind_direction.opposite();
        let cloud_dispersal = climate.clouds / (5.0 + self.wind_strength);
        let runoff = climate.moisture * self.runoff_factor / 6.0;
        let seepage = climate.moisture * self.seepage_factor / 6.0;

        for edge in grid.adjacency().out_edges(cell) {
            let neighbor = &mut next[edge.target];
            if edge.direction == main_dispersal {
                neighbor.clouds += cloud_dispersal * self.wind_strength;
            } else {
                neighbor.clouds += cloud_dispersal;
            }

            let delta = grid[edge.target].view_elevation() - here.view_elevation();
            if delta < 0 {
                climate.moisture -= runoff;
                neighbor.moisture += runoff;
            } else if delta == 0 {
                climate.moisture -= seepage;
                neighbor.moisture += seepage;
            }
        }

        let kept = &mut next[cell];
        kept.moisture = (kept.moisture + climate.moisture).min(1.0);
        current[cell] = ClimateData::default();
    }

    /// Fill in `temperature` for every cell from latitude, height above the
    /// water level and a per-map noise jitter.
    pub fn assign_temperatures<R: Rng>(&self, grid: &Grid, climate: &mut [ClimateData], rng: &mut R) {
        let channel = rng.gen_range(0..JITTER_CHANNELS);
        let noise = Perlin::new(1).set_seed(rng.gen::<u32>());

        for (cell, data) in climate.iter_mut().enumerate().take(grid.len()) {
            let (x, z) = grid.position_of(cell);
            let sample = noise.get([
                f64::from(x) * JITTER_SCALE,
                f64::from(z) * JITTER_SCALE,
                f64::from(channel) * 10.0,
            ]);
            let jitter = ((sample + 1.0) * 0.5).clamp(0.0, 1.0) as f32;
            data.temperature = self.temperature(grid, cell, jitter);
        }
    }

    /// Temperature for one cell given a jitter sample in [0, 1].
    pub fn temperature(&self, grid: &Grid, cell: usize, jitter: f32) -> f32 {
        let (_, row) = grid.offset_of(cell);
        let mut latitude = row as f32 / grid.height() as f32;
        match self.hemisphere {
            Hemisphere::Both => {
                latitude *= 2.0;
                if latitude > 1.0 {
                    latitude = 2.0 - latitude;
                }
            }
            Hemisphere::North => latitude = 1.0 - latitude,
            Hemisphere::South => {}
        }

        let mut temperature = self.low_temperature + (self.high_temperature - self.low_temperature) * latitude;
        let altitude = (grid[cell].view_elevation() - self.water_level) as f32;
        temperature *= 1.0 - altitude / (self.elevation_max - self.water_level + 1) as f32;
        temperature += (jitter * 2.0 - 1.0) * self.temperature_jitter;
        temperature.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Island in the middle of a 20x20 sea, rising toward the centre.
    fn island_grid(config: &MapConfig) -> Grid {
        let mut grid = Grid::new(20, 20, false);
        for i in 0..grid.len() {
            let (col, row) = grid.offset_of(i);
            let d = (col as i32 - 10).abs().max((row as i32 - 10).abs());
            grid[i].water_level = config.water_level();
            grid[i].elevation = (9 - d).clamp(0, config.elevation_max());
        }
        grid
    }

    #[test]
    fn test_values_stay_in_unit_range_every_cycle() {
        let config = MapConfig::default();
        let grid = island_grid(&config);
        let simulator = ClimateSimulator::new(&config);

        let mut cycles_seen = 0;
        let climate = simulator.run_cycles(&grid, CLIMATE_CYCLES, |_, buffer| {
            cycles_seen += 1;
            for data in buffer {
                assert!((0.0..=1.0).contains(&data.clouds));
                assert!((0.0..=1.0).contains(&data.moisture));
            }
        });
        assert_eq!(cycles_seen, CLIMATE_CYCLES);
        assert_eq!(climate.len(), grid.len());
    }

    #[test]
    fn test_sea_is_wet() {
        let config = MapConfig::default();
        let grid = island_grid(&config);
        let climate = ClimateSimulator::new(&config).run(&grid);

        let sea = grid.index_at_offset(0, 0).unwrap();
        assert!(grid[sea].is_underwater());
        assert!(climate[sea].moisture > 0.5);
    }

    #[test]
    fn test_temperature_latitude() {
        let mut config = MapConfig::default();
        config.set_temperature_jitter(0.0);
        let grid = Grid::new(10, 20, false);
        let simulator = ClimateSimulator::new(&config);

        let pole = grid.index_at_offset(3, 0).unwrap();
        let equator = grid.index_at_offset(3, 10).unwrap();
        assert!(simulator.temperature(&grid, pole, 0.5) < simulator.temperature(&grid, equator, 0.5));

        config.hemisphere = Hemisphere::North;
        let north = ClimateSimulator::new(&config);
        let top = grid.index_at_offset(3, 19).unwrap();
        assert!(north.temperature(&grid, top, 0.5) < north.temperature(&grid, pole, 0.5));
    }

    #[test]
    fn test_temperatures_are_deterministic_and_bounded() {
        let config = MapConfig::default();
        let grid = island_grid(&config);
        let simulator = ClimateSimulator::new(&config);

        let mut a = vec![ClimateData::default(); grid.len()];
        let mut b = a.clone();
        simulator.assign_temperatures(&grid, &mut a, &mut ChaCha8Rng::seed_from_u64(3));
        simulator.assign_temperatures(&grid, &mut b, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
        assert!(a.iter().all(|d| (0.0..=1.0).contains(&d.temperature)));
    }
}
