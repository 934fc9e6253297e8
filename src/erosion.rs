//! Thermal erosion
//!
//! Wears down steep cells: a cell with a neighbour at least two levels lower
//! loses one level and that neighbour gains one. The set of such cells is
//! maintained incrementally around each change instead of rescanning the map.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::grid::Grid;

/// Minimum elevation drop to a neighbour that makes a cell erodible
pub const EROSION_THRESHOLD: i32 = 2;

/// Cells currently erodible, with O(1) membership, insert and removal.
#[derive(Clone, Debug)]
struct ErodibleSet {
    cells: Vec<usize>,
    position: Vec<Option<usize>>,
}

impl ErodibleSet {
    fn new(cell_count: usize) -> Self {
        Self {
            cells: Vec::new(),
            position: vec![None; cell_count],
        }
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn contains(&self, cell: usize) -> bool {
        self.position[cell].is_some()
    }

    fn get(&self, slot: usize) -> usize {
        self.cells[slot]
    }

    fn insert(&mut self, cell: usize) {
        if self.position[cell].is_none() {
            self.position[cell] = Some(self.cells.len());
            self.cells.push(cell);
        }
    }

    fn remove(&mut self, cell: usize) {
        let Some(slot) = self.position[cell].take() else {
            return;
        };
        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.position[moved] = Some(slot);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErosionReport {
    pub initial_erodible: usize,
    pub final_erodible: usize,
    /// Number of one-level moves performed
    pub steps: usize,
}

#[derive(Clone, Debug)]
pub struct ErosionSimulator {
    erosion_percentage: u32,
}

pub fn is_erodible(grid: &Grid, cell: usize) -> bool {
    let erodible_elevation = grid[cell].elevation - EROSION_THRESHOLD;
    grid.neighbors(cell).any(|n| grid[n].elevation <= erodible_elevation)
}

impl ErosionSimulator {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            erosion_percentage: config.erosion_percentage(),
        }
    }

    /// Erode until the erodible set shrinks to `100 - erosion%` of its
    /// starting size.
    pub fn run<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> Result<ErosionReport> {
        let mut erodible = ErodibleSet::new(grid.len());
        for cell in 0..grid.len() {
            if is_erodible(grid, cell) {
                erodible.insert(cell);
            }
        }
        let initial = erodible.len();
        let target = initial * (100 - self.erosion_percentage.min(100)) as usize / 100;
        let mut steps = 0;

        while erodible.len() > target {
            let cell = erodible.get(rng.gen_range(0..erodible.len()));
            let runoff = erosion_target(grid, cell, rng)?;

            grid[cell].elevation -= 1;
            grid[runoff].elevation += 1;
            steps += 1;

            if !is_erodible(grid, cell) {
                erodible.remove(cell);
            }
            let lifted = grid[cell].elevation + EROSION_THRESHOLD;
            for neighbor in grid.neighbors(cell).collect::<Vec<_>>() {
                if grid[neighbor].elevation == lifted {
                    erodible.insert(neighbor);
                }
            }

            if is_erodible(grid, runoff) {
                erodible.insert(runoff);
            }
            let settled = grid[runoff].elevation + 1;
            for neighbor in grid.neighbors(runoff).collect::<Vec<_>>() {
                if neighbor != cell
                    && grid[neighbor].elevation == settled
                    && erodible.contains(neighbor)
                    && !is_erodible(grid, neighbor)
                {
                    erodible.remove(neighbor);
                }
            }
        }

        debug!(
            "Erosion moved {} levels, erodible cells {} -> {}",
            steps,
            initial,
            erodible.len()
        );
        Ok(ErosionReport {
            initial_erodible: initial,
            final_erodible: erodible.len(),
            steps,
        })
    }
}

/// Random neighbour of an erodible cell that sits at least two levels lower.
fn erosion_target<R: Rng>(grid: &Grid, cell: usize, rng: &mut R) -> Result<usize> {
    let erodible_elevation = grid[cell].elevation - EROSION_THRESHOLD;
    let candidates: Vec<usize> = grid
        .neighbors(cell)
        .filter(|&n| grid[n].elevation <= erodible_elevation)
        .collect();
    if candidates.is_empty() {
        return Err(MapError::InvariantViolation(format!(
            "cell {} is in the erodible set but has no runoff target",
            grid[cell].coordinate()
        )));
    }
    Ok(candidates[rng.gen_range(0..candidates.len())])
}
