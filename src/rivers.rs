//! River generation
//!
//! Picks river origins weighted by moisture and height, then walks each river
//! downhill one cell at a time until it reaches water, joins another river or
//! gets stuck and turns into a lake.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::climate::ClimateData;
use crate::config::MapConfig;
use crate::coords::Direction;
use crate::error::{MapError, Result};
use crate::grid::Grid;
use crate::util::percent_of;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiverReport {
    /// River cells requested, as a share of land cells
    pub budget: usize,
    /// Budget still unspent once the origin pool ran dry
    pub remaining_budget: usize,
    pub rivers: usize,
    pub lakes: usize,
}

#[derive(Clone, Debug)]
pub struct RiverBuilder {
    water_level: i32,
    elevation_max: i32,
    river_percentage: u32,
    extra_lake_probability: f32,
}

impl RiverBuilder {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            water_level: config.water_level(),
            elevation_max: config.elevation_max(),
            river_percentage: config.river_percentage(),
            extra_lake_probability: config.extra_lake_probability(),
        }
    }

    /// Candidate origins. Higher and wetter cells appear more often, so they
    /// are more likely to be drawn.
    pub fn origin_pool(&self, grid: &Grid, climate: &[ClimateData]) -> Vec<usize> {
        let span = (self.elevation_max - self.water_level).max(1) as f32;
        let mut pool = Vec::new();
        for (cell, data) in grid.cells().iter().zip(climate) {
            if cell.is_underwater() {
                continue;
            }
            let weight = data.moisture * (cell.elevation - self.water_level) as f32 / span;
            let copies = match weight {
                w if w > 0.75 => 4,
                w if w > 0.5 => 2,
                w if w > 0.25 => 1,
                _ => 0,
            };
            pool.extend(std::iter::repeat(cell.index()).take(copies));
        }
        pool
    }

    /// Grow rivers until `land_cells * river%` river cells exist or no
    /// candidates are left.
    pub fn create_rivers<R: Rng>(
        &self,
        grid: &mut Grid,
        climate: &[ClimateData],
        land_cells: usize,
        rng: &mut R,
    ) -> Result<RiverReport> {
        let mut origins = self.origin_pool(grid, climate);
        let budget = percent_of(land_cells, self.river_percentage);
        let mut report = RiverReport {
            budget,
            ..Default::default()
        };
        let mut remaining = budget;

        while remaining > 0 && !origins.is_empty() {
            let origin = origins.swap_remove(rng.gen_range(0..origins.len()));
            if grid.rivers().has_river(origin) {
                continue;
            }
            let blocked = grid
                .neighbors(origin)
                .any(|n| grid.rivers().has_river(n) || grid[n].is_underwater());
            if blocked {
                continue;
            }

            let outcome = self.create_river(grid, origin, rng)?;
            if outcome.length > 0 {
                report.rivers += 1;
            }
            if outcome.lake {
                report.lakes += 1;
            }
            remaining = remaining.saturating_sub(outcome.length);
        }

        if remaining > 0 {
            warn!("Failed to use up {} of {} river budget", remaining, budget);
        }
        report.remaining_budget = remaining;
        debug!("Created {} rivers and {} lakes", report.rivers, report.lakes);
        Ok(report)
    }

    /// Walk one river from `origin`. A length of 0 means no river was laid.
    fn create_river<R: Rng>(&self, grid: &mut Grid, origin: usize, rng: &mut R) -> Result<RiverOutcome> {
        let mut length = 1;
        let mut cell = origin;
        let mut direction = Direction::NE;
        let mut lake = false;
        let mut flow_directions = Vec::with_capacity(36);

        while !grid[cell].is_underwater() {
            let elevation = grid[cell].elevation;
            let mut min_neighbor_elevation = i32::MAX;
            flow_directions.clear();

            for edge in grid.adjacency().out_edges(cell).collect::<Vec<_>>() {
                let neighbor = edge.target;
                let d = edge.direction;
                min_neighbor_elevation = min_neighbor_elevation.min(grid[neighbor].elevation);
                if neighbor == origin || grid.rivers().has_incoming(neighbor) {
                    continue;
                }
                let delta = grid[neighbor].elevation - elevation;
                if delta > 0 {
                    continue;
                }
                if grid.rivers().has_outgoing(neighbor) {
                    self.set_river(grid, cell, d)?;
                    return Ok(RiverOutcome { length, lake });
                }
                if delta < 0 {
                    flow_directions.extend([d, d, d]);
                }
                if length == 1 || (d != direction.next2() && d != direction.previous2()) {
                    flow_directions.push(d);
                }
                flow_directions.push(d);
            }

            if flow_directions.is_empty() {
                if length == 1 {
                    return Ok(RiverOutcome { length: 0, lake });
                }
                if min_neighbor_elevation >= elevation {
                    let here = &mut grid[cell];
                    here.water_level = min_neighbor_elevation;
                    if min_neighbor_elevation == elevation {
                        here.elevation = min_neighbor_elevation - 1;
                    }
                    lake = true;
                }
                break;
            }

            direction = flow_directions[rng.gen_range(0..flow_directions.len())];
            self.set_river(grid, cell, direction)?;
            length += 1;

            if min_neighbor_elevation >= elevation && rng.gen::<f32>() < self.extra_lake_probability {
                let here = &mut grid[cell];
                here.water_level = here.elevation;
                here.elevation -= 1;
                lake = true;
            }

            cell = grid.neighbor(cell, direction).ok_or_else(|| {
                MapError::InvariantViolation(format!("river left the map at {}", grid[cell].coordinate()))
            })?;
        }
        Ok(RiverOutcome { length, lake })
    }

    fn set_river(&self, grid: &mut Grid, cell: usize, direction: Direction) -> Result<()> {
        if grid.set_outgoing_river(cell, direction) {
            Ok(())
        } else {
            Err(MapError::InvariantViolation(format!(
                "river from {} toward {} is not a valid flow",
                grid[cell].coordinate(),
                direction
            )))
        }
    }
}

struct RiverOutcome {
    length: usize,
    lake: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// A 20x20 cone rising from a surrounding sea.
    fn cone(config: &MapConfig) -> (Grid, Vec<ClimateData>) {
        let mut grid = Grid::new(20, 20, false);
        for i in 0..grid.len() {
            let (col, row) = grid.offset_of(i);
            let d = (col as i32 - 10).abs().max((row as i32 - 10).abs());
            grid[i].water_level = config.water_level();
            grid[i].elevation = (10 - d).clamp(0, config.elevation_max());
        }
        let climate = vec![
            ClimateData {
                moisture: 1.0,
                ..Default::default()
            };
            grid.len()
        ];
        (grid, climate)
    }

    fn assert_valid_rivers(grid: &Grid) {
        for edge in grid.rivers().edges() {
            let (source, target) = (&grid[edge.source], &grid[edge.target]);
            assert!(
                source.elevation >= target.elevation || source.water_level == target.elevation,
                "river {} -> {} flows uphill",
                source.coordinate(),
                target.coordinate()
            );
        }
    }

    #[test]
    fn test_origin_pool_weights() {
        let config = MapConfig::default();
        let (grid, climate) = cone(&config);
        let pool = RiverBuilder::new(&config).origin_pool(&grid, &climate);

        let peak = grid.index_at_offset(10, 10).unwrap();
        let shore = grid.index_at_offset(10, 3).unwrap();
        assert_eq!(pool.iter().filter(|&&c| c == peak).count(), 4);
        assert_eq!(pool.iter().filter(|&&c| c == shore).count(), 0);
        assert!(pool.iter().all(|&c| !grid[c].is_underwater()));
    }

    #[test]
    fn test_rivers_flow_downhill_without_loops() {
        let mut config = MapConfig::default();
        config.set_river_percentage(20);
        let (mut grid, climate) = cone(&config);
        let land = grid.land_cell_count();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let report = RiverBuilder::new(&config)
            .create_rivers(&mut grid, &climate, land, &mut rng)
            .unwrap();
        assert!(report.rivers > 0);
        assert_valid_rivers(&grid);

        // Follow every river from its source; no cell may repeat
        for start in grid.cells().iter().map(|c| c.index()) {
            if grid.rivers().has_incoming(start) || !grid.rivers().has_outgoing(start) {
                continue;
            }
            let mut seen = std::collections::HashSet::new();
            let mut cell = start;
            while let Some(edge) = grid.rivers().outgoing(cell) {
                assert!(seen.insert(cell), "river revisits {}", grid[cell].coordinate());
                cell = edge.target;
            }
        }
    }

    #[test]
    fn test_zero_budget_creates_nothing() {
        let mut config = MapConfig::default();
        config.set_river_percentage(0);
        let (mut grid, climate) = cone(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = RiverBuilder::new(&config)
            .create_rivers(&mut grid, &climate, 100, &mut rng)
            .unwrap();
        assert_eq!(report.rivers, 0);
        assert_eq!(grid.rivers().edge_count(), 0);
    }

    #[test]
    fn test_dry_map_leaves_budget() {
        let config = MapConfig::default();
        let (mut grid, _) = cone(&config);
        let dry = vec![ClimateData::default(); grid.len()];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = RiverBuilder::new(&config)
            .create_rivers(&mut grid, &dry, 200, &mut rng)
            .unwrap();
        assert_eq!(report.remaining_budget, report.budget);
        assert_eq!(report.budget, 20);
    }
}
