//! PNG previews of generated maps
//!
//! Cells are drawn as square blocks in offset layout: odd rows shift half a
//! block east, and row 0 (the southern edge) is at the bottom of the image.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::cell::{Cell, Terrain};
use crate::climate::ClimateData;
use crate::grid::Grid;

/// Side length of one cell block in pixels
pub const CELL_PIXELS: u32 = 4;

const RIVER_COLOR: [u8; 3] = [25, 55, 150];

fn terrain_color(terrain: Terrain) -> [u8; 3] {
    match terrain {
        Terrain::Sand => [210, 190, 140],
        Terrain::Grass => [90, 160, 70],
        Terrain::Mud => [120, 100, 70],
        Terrain::Stone => [130, 125, 120],
        Terrain::Snow => [240, 240, 245],
    }
}

fn water_color(cell: &Cell) -> [u8; 3] {
    let depth = (cell.water_level - cell.elevation).clamp(1, 6) as f32;
    lerp_color([70, 130, 190], [20, 40, 90], (depth - 1.0) / 5.0)
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

/// Spectral colormap: dark blue -> teal -> yellow -> orange -> dark red
fn spectral_colormap(t: f32) -> [u8; 3] {
    const STOPS: [[u8; 3]; 6] = [
        [94, 79, 162],
        [50, 136, 189],
        [171, 221, 164],
        [255, 255, 191],
        [244, 109, 67],
        [158, 1, 66],
    ];
    let scaled = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f32;
    let idx = (scaled as usize).min(STOPS.len() - 2);
    lerp_color(STOPS[idx], STOPS[idx + 1], scaled - idx as f32)
}

/// Paint one block per cell using `color`.
fn render_cells<F>(grid: &Grid, mut color: F) -> RgbImage
where
    F: FnMut(usize, &Cell) -> [u8; 3],
{
    let width = grid.width() as u32 * CELL_PIXELS + CELL_PIXELS / 2;
    let height = grid.height() as u32 * CELL_PIXELS;
    let mut img: RgbImage = ImageBuffer::from_pixel(width, height, Rgb([0, 0, 0]));

    for (index, cell) in grid.cells().iter().enumerate() {
        let (col, row) = grid.offset_of(index);
        let x0 = col as u32 * CELL_PIXELS + if row % 2 == 1 { CELL_PIXELS / 2 } else { 0 };
        let y0 = (grid.height() - 1 - row) as u32 * CELL_PIXELS;
        let rgb = Rgb(color(index, cell));
        for dy in 0..CELL_PIXELS {
            for dx in 0..CELL_PIXELS {
                img.put_pixel(x0 + dx, y0 + dy, rgb);
            }
        }
    }
    img
}

/// Terrain types on land, depth-shaded water, rivers in dark blue.
pub fn render_terrain(grid: &Grid) -> RgbImage {
    render_cells(grid, |index, cell| {
        if cell.is_underwater() {
            water_color(cell)
        } else if grid.rivers().has_river(index) {
            lerp_color(terrain_color(cell.terrain), RIVER_COLOR, 0.7)
        } else {
            terrain_color(cell.terrain)
        }
    })
}

/// Elevation through a spectral colormap, normalized to the map's range.
pub fn render_elevation(grid: &Grid) -> RgbImage {
    let min = grid.cells().iter().map(|c| c.elevation).min().unwrap_or(0);
    let max = grid.cells().iter().map(|c| c.elevation).max().unwrap_or(0);
    let range = (max - min).max(1) as f32;
    render_cells(grid, |_, cell| spectral_colormap((cell.elevation - min) as f32 / range))
}

/// Moisture from dry (tan) to wet (blue).
pub fn render_moisture(grid: &Grid, climate: &[ClimateData]) -> RgbImage {
    render_cells(grid, |index, _| {
        let moisture = climate.get(index).map_or(0.0, |c| c.moisture);
        lerp_color([200, 170, 110], [30, 80, 200], moisture)
    })
}

/// PNG preview modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewMode {
    Terrain,
    Elevation,
    Moisture,
}

impl PreviewMode {
    pub fn name(&self) -> &'static str {
        match self {
            PreviewMode::Terrain => "Terrain",
            PreviewMode::Elevation => "Elevation",
            PreviewMode::Moisture => "Moisture",
        }
    }

    pub fn all() -> &'static [PreviewMode] {
        &[PreviewMode::Terrain, PreviewMode::Elevation, PreviewMode::Moisture]
    }

    /// Parse from string (for CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
    }
}

pub fn render_preview(grid: &Grid, climate: &[ClimateData], mode: PreviewMode) -> RgbImage {
    match mode {
        PreviewMode::Terrain => render_terrain(grid),
        PreviewMode::Elevation => render_elevation(grid),
        PreviewMode::Moisture => render_moisture(grid, climate),
    }
}

pub fn export_png(
    grid: &Grid,
    climate: &[ClimateData],
    mode: PreviewMode,
    path: impl AsRef<Path>,
) -> Result<(), image::ImageError> {
    render_preview(grid, climate, mode).save(path)
}

pub fn export_terrain_png(grid: &Grid, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
    render_terrain(grid).save(path)
}

pub fn export_elevation_png(grid: &Grid, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
    render_elevation(grid).save(path)
}

pub fn export_moisture_png(
    grid: &Grid,
    climate: &[ClimateData],
    path: impl AsRef<Path>,
) -> Result<(), image::ImageError> {
    render_moisture(grid, climate).save(path)
}
