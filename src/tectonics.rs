//! Tectonic land generation
//!
//! Raises and sinks random chunks of cells until the requested share of the
//! map is above water. Each chunk grows from a random cell in a region by a
//! priority flood: cells closer to the chunk origin are visited first, with a
//! random penalty on some cells so chunk outlines come out ragged.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::grid::Grid;
use crate::regions::RegionRect;
use crate::util::percent_of;

/// Maximum number of raise/sink rounds before giving up on the land budget
pub const GUARD_LIMIT: usize = 10_000;

/// Frontier entry. Lower priority pops first; among equal priorities the
/// most recently pushed entry pops first.
#[derive(Clone, Copy, Debug)]
struct FrontierCell {
    cell: usize,
    priority: i32,
    seq: u64,
}

impl PartialEq for FrontierCell {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for FrontierCell {}

impl PartialOrd for FrontierCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierCell {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Reusable search state for chunk floods. Visited marks are phase numbers,
/// so starting a new search never has to clear the table.
#[derive(Clone, Debug, Default)]
struct SearchFrontier {
    phase: Vec<u32>,
    current_phase: u32,
    heap: BinaryHeap<FrontierCell>,
    seq: u64,
}

impl SearchFrontier {
    fn new(cell_count: usize) -> Self {
        Self {
            phase: vec![0; cell_count],
            ..Default::default()
        }
    }

    fn begin(&mut self) {
        self.heap.clear();
        self.current_phase += 1;
    }

    /// Mark and push a cell not yet seen in this search. Returns false if it
    /// was already visited.
    fn visit(&mut self, cell: usize, priority: i32) -> bool {
        if self.phase[cell] >= self.current_phase {
            return false;
        }
        self.phase[cell] = self.current_phase;
        self.seq += 1;
        self.heap.push(FrontierCell { cell, priority, seq: self.seq });
        true
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|entry| entry.cell)
    }
}

/// Outcome of [`TerrainGenerator::create_land`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandReport {
    pub requested_land_cells: usize,
    /// Requested minus whatever budget was left when the guard limit hit
    pub actual_land_cells: usize,
    /// Raise/sink rounds used
    pub rounds: usize,
}

impl LandReport {
    pub fn shortfall(&self) -> usize {
        self.requested_land_cells.saturating_sub(self.actual_land_cells)
    }
}

#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    land_percentage: u32,
    chunk_size_min: usize,
    chunk_size_max: usize,
    sink_probability: f32,
    high_rise_probability: f32,
    jitter_probability: f32,
    elevation_min: i32,
    elevation_max: i32,
    water_level: i32,
    guard_limit: usize,
    frontier: SearchFrontier,
}

impl TerrainGenerator {
    pub fn new(config: &MapConfig, cell_count: usize) -> Self {
        let (chunk_size_min, chunk_size_max) = config.chunk_size_range();
        Self {
            land_percentage: config.land_percentage(),
            chunk_size_min,
            chunk_size_max,
            sink_probability: config.sink_probability(),
            high_rise_probability: config.high_rise_probability(),
            jitter_probability: config.jitter_probability(),
            elevation_min: config.elevation_min(),
            elevation_max: config.elevation_max(),
            water_level: config.water_level(),
            guard_limit: GUARD_LIMIT,
            frontier: SearchFrontier::new(cell_count),
        }
    }

    /// Cap the number of raise/sink rounds below [`GUARD_LIMIT`].
    pub fn with_guard_limit(mut self, limit: usize) -> Self {
        self.guard_limit = limit.min(GUARD_LIMIT);
        self
    }

    /// Shape the landmasses. Each round flips one coin for raise vs. sink and
    /// then runs one chunk per region. Stops as soon as a raise spends the
    /// last of the land budget, or after the guard limit of rounds.
    pub fn create_land<R: Rng>(&mut self, grid: &mut Grid, regions: &[RegionRect], rng: &mut R) -> LandReport {
        let requested = percent_of(grid.len(), self.land_percentage);
        let mut budget = requested;
        let mut rounds = 0;

        if requested > 0 && !regions.is_empty() {
            'rounds: while rounds < self.guard_limit {
                rounds += 1;
                let sink = rng.gen::<f32>() < self.sink_probability;
                for region in regions {
                    let chunk_size = rng.gen_range(self.chunk_size_min..=self.chunk_size_max);
                    if sink {
                        budget = self.sink_terrain(grid, chunk_size, budget, region, rng);
                    } else {
                        budget = self.raise_terrain(grid, chunk_size, budget, region, rng);
                        if budget == 0 {
                            break 'rounds;
                        }
                    }
                }
            }
        }

        if budget > 0 {
            warn!(
                "Failed to use up {} of {} land budget after {} rounds",
                budget, requested, rounds
            );
        }
        debug!("Created land in {} rounds", rounds);
        LandReport {
            requested_land_cells: requested,
            actual_land_cells: requested.saturating_sub(budget),
            rounds,
        }
    }

    /// Raise up to `chunk_size` cells. Returns the remaining budget, which
    /// drops by one for every cell lifted above the water level.
    fn raise_terrain<R: Rng>(
        &mut self,
        grid: &mut Grid,
        chunk_size: usize,
        mut budget: usize,
        region: &RegionRect,
        rng: &mut R,
    ) -> usize {
        let center = self.start_chunk(grid, region, rng);
        let rise = if rng.gen::<f32>() < self.high_rise_probability { 2 } else { 1 };
        let mut size = 0;

        while size < chunk_size {
            let Some(current) = self.frontier.pop() else {
                break;
            };
            let original = grid[current].elevation;
            let raised = original + rise;
            if raised > self.elevation_max {
                continue;
            }
            grid[current].elevation = raised;
            if original < self.water_level && raised >= self.water_level {
                budget -= 1;
                if budget == 0 {
                    break;
                }
            }
            size += 1;
            self.expand(grid, current, center, rng);
        }
        budget
    }

    /// Sink up to `chunk_size` cells. Every cell dropped below the water
    /// level gives one cell back to the budget.
    fn sink_terrain<R: Rng>(
        &mut self,
        grid: &mut Grid,
        chunk_size: usize,
        mut budget: usize,
        region: &RegionRect,
        rng: &mut R,
    ) -> usize {
        let center = self.start_chunk(grid, region, rng);
        let sink = if rng.gen::<f32>() < self.high_rise_probability { 2 } else { 1 };
        let mut size = 0;

        while size < chunk_size {
            let Some(current) = self.frontier.pop() else {
                break;
            };
            let original = grid[current].elevation;
            let sunk = original - sink;
            if sunk < self.elevation_min {
                continue;
            }
            grid[current].elevation = sunk;
            if original >= self.water_level && sunk < self.water_level {
                budget += 1;
            }
            size += 1;
            self.expand(grid, current, center, rng);
        }
        budget
    }

    fn start_chunk<R: Rng>(&mut self, grid: &Grid, region: &RegionRect, rng: &mut R) -> usize {
        self.frontier.begin();
        let first = region.random_cell(grid.width(), rng);
        self.frontier.visit(first, 0);
        first
    }

    fn expand<R: Rng>(&mut self, grid: &Grid, current: usize, center: usize, rng: &mut R) {
        let origin = grid[center].coordinate();
        let wrap_size = grid.wrap_size();
        for neighbor in grid.neighbors(current) {
            if self.frontier.phase[neighbor] >= self.frontier.current_phase {
                continue;
            }
            let distance = grid[neighbor].coordinate().distance(origin, wrap_size);
            let heuristic = i32::from(rng.gen::<f32>() < self.jitter_probability);
            self.frontier.visit(neighbor, distance + heuristic);
        }
    }
}
