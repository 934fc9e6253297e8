//! Region partitioning
//!
//! Splits the map into 1-4 rectangles that scope the tectonic raise/sink
//! passes. Regions are padded from the map edge by the map border and from
//! each other by the region border.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::grid::Grid;

/// Axis-aligned rectangle of offset coordinates. Maxima are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRect {
    pub x_min: usize,
    pub x_max: usize,
    pub z_min: usize,
    pub z_max: usize,
}

impl RegionRect {
    /// Build a rectangle from unclamped bounds. Borders wider than the map
    /// would leave the rectangle empty, so each axis keeps at least one
    /// column/row inside the map.
    fn clamped(x_min: i64, x_max: i64, z_min: i64, z_max: i64, width: usize, height: usize) -> Self {
        let (x_min, x_max) = clamp_span(x_min, x_max, width);
        let (z_min, z_max) = clamp_span(z_min, z_max, height);
        Self { x_min, x_max, z_min, z_max }
    }

    pub fn width(&self) -> usize {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> usize {
        self.z_max - self.z_min
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, col: usize, row: usize) -> bool {
        (self.x_min..self.x_max).contains(&col) && (self.z_min..self.z_max).contains(&row)
    }

    /// Random cell index inside the region on a grid `grid_width` columns wide.
    pub fn random_cell<R: Rng>(&self, grid_width: usize, rng: &mut R) -> usize {
        let col = rng.gen_range(self.x_min..self.x_max);
        let row = rng.gen_range(self.z_min..self.z_max);
        row * grid_width + col
    }
}

fn clamp_span(min: i64, max: i64, dim: usize) -> (usize, usize) {
    let dim = dim.max(1) as i64;
    let min = min.clamp(0, dim - 1);
    let max = max.clamp(min + 1, dim);
    (min as usize, max as usize)
}

/// Partition settings, taken from the config and the (chunk-rounded) grid.
#[derive(Clone, Debug)]
pub struct RegionPartitioner {
    width: usize,
    height: usize,
    wrapping: bool,
    map_border_x: usize,
    map_border_z: usize,
    region_border: usize,
    region_count: usize,
}

impl RegionPartitioner {
    pub fn new(config: &MapConfig, grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            wrapping: grid.is_wrapping(),
            map_border_x: config.map_border_x(),
            map_border_z: config.map_border_z(),
            region_border: config.region_border(),
            region_count: config.region_count(),
        }
    }

    /// Split the map. Two regions are split side by side or stacked on a coin
    /// flip; three are vertical thirds; four are quadrants. On wrapping maps
    /// the east-west map border is replaced by the region border, and dropped
    /// entirely where a region spans the full width.
    pub fn partition<R: Rng>(&self, rng: &mut R) -> Vec<RegionRect> {
        let w = self.width as i64;
        let h = self.height as i64;
        let map_z = self.map_border_z as i64;
        let gap = self.region_border as i64;
        let border_x = if self.wrapping { gap } else { self.map_border_x as i64 };
        let full_border_x = if self.wrapping { 0 } else { border_x };
        let rect = |x_min, x_max, z_min, z_max| RegionRect::clamped(x_min, x_max, z_min, z_max, self.width, self.height);

        match self.region_count {
            0 | 1 => vec![rect(full_border_x, w - full_border_x, map_z, h - map_z)],
            2 => {
                if rng.gen::<f32>() < 0.5 {
                    vec![
                        rect(border_x, w / 2 - gap, map_z, h - map_z),
                        rect(w / 2 + gap, w - border_x, map_z, h - map_z),
                    ]
                } else {
                    vec![
                        rect(full_border_x, w - full_border_x, map_z, h / 2 - gap),
                        rect(full_border_x, w - full_border_x, h / 2 + gap, h - map_z),
                    ]
                }
            }
            3 => vec![
                rect(border_x, w / 3 - gap, map_z, h - map_z),
                rect(w / 3 + gap, w * 2 / 3 - gap, map_z, h - map_z),
                rect(w * 2 / 3 + gap, w - border_x, map_z, h - map_z),
            ],
            _ => vec![
                rect(border_x, w / 2 - gap, map_z, h / 2 - gap),
                rect(w / 2 + gap, w - border_x, map_z, h / 2 - gap),
                rect(w / 2 + gap, w - border_x, h / 2 + gap, h - map_z),
                rect(border_x, w / 2 - gap, h / 2 + gap, h - map_z),
            ],
        }
    }
}
