//! ASCII rendering of generated maps
//!
//! One character per cell, northern rows first, odd rows indented by one
//! column so the hex offset layout reads correctly.

use crate::cell::{Cell, Terrain};
use crate::climate::ClimateData;
use crate::grid::Grid;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsciiMode {
    /// Terrain type, water as `~`
    Terrain,
    /// Elevation gradient
    Elevation,
    /// Moisture gradient
    Moisture,
    /// River cells on a land/water mask
    Rivers,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Terrain => "Terrain",
            AsciiMode::Elevation => "Elevation",
            AsciiMode::Moisture => "Moisture",
            AsciiMode::Rivers => "Rivers",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[AsciiMode::Terrain, AsciiMode::Elevation, AsciiMode::Moisture, AsciiMode::Rivers]
    }

    /// Parse from string (for CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
    }
}

/// Get ASCII character for a cell's terrain
pub fn terrain_char(cell: &Cell) -> char {
    if cell.is_underwater() {
        return '~';
    }
    match cell.terrain {
        Terrain::Sand => '.',
        Terrain::Grass if cell.plant_level() >= 2 => 'T',
        Terrain::Grass => '"',
        Terrain::Mud => ',',
        Terrain::Stone => '^',
        Terrain::Snow => '#',
    }
}

/// Get ASCII character for elevation, from -4 (deepest) to 10 (highest)
pub fn elevation_char(elevation: i32) -> char {
    const CHARS: &[char] = &['~', '~', '.', '.', '-', '-', '=', '+', '*', '#', '%', '^', 'A', 'M', 'M'];
    let idx = (elevation + 4).clamp(0, CHARS.len() as i32 - 1) as usize;
    CHARS[idx]
}

/// Get ASCII character for moisture
pub fn moisture_char(moisture: f32) -> char {
    // 0.0 to 1.0
    const CHARS: &[char] = &['_', '.', '-', ':', ';', '=', '+', '#', '%', '~'];
    let idx = (moisture.clamp(0.0, 1.0) * (CHARS.len() - 1) as f32) as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

pub fn render_ascii(grid: &Grid, climate: &[ClimateData], mode: AsciiMode) -> String {
    let mut result = String::with_capacity((grid.width() + 2) * grid.height());

    for row in (0..grid.height()).rev() {
        if row % 2 == 1 {
            result.push(' ');
        }
        for col in 0..grid.width() {
            let index = row * grid.width() + col;
            let cell = &grid[index];
            let ch = match mode {
                AsciiMode::Terrain => terrain_char(cell),
                AsciiMode::Elevation => elevation_char(cell.elevation),
                AsciiMode::Moisture => moisture_char(climate.get(index).map_or(0.0, |c| c.moisture)),
                AsciiMode::Rivers => {
                    if grid.rivers().has_river(index) {
                        '*'
                    } else if cell.is_underwater() {
                        '~'
                    } else {
                        '.'
                    }
                }
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Generate legend for terrain characters
pub fn terrain_legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== TERRAIN LEGEND ===\n");
    legend.push_str("  ~ Water   . Sand   \" Grass   T Forest\n");
    legend.push_str("  , Mud     ^ Stone  # Snow\n");
    legend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Direction;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(AsciiMode::from_str("rivers"), Some(AsciiMode::Rivers));
        assert_eq!(AsciiMode::from_str("ELEVATION"), Some(AsciiMode::Elevation));
        assert_eq!(AsciiMode::from_str("plates"), None);
    }

    #[test]
    fn test_render_layout() {
        let mut grid = Grid::new(5, 5, false);
        for cell in grid.cells_mut() {
            cell.elevation = 4;
            cell.water_level = 3;
        }
        assert!(grid.set_outgoing_river(12, Direction::E));
        let climate = vec![ClimateData::default(); grid.len()];

        let text = render_ascii(&grid, &climate, AsciiMode::Rivers);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], ".....", "row 4 first");
        assert_eq!(lines[1], " .....", "odd row indented");
        assert_eq!(lines[2], "..**.");
    }

    #[test]
    fn test_elevation_char_clamps() {
        assert_eq!(elevation_char(-10), '~');
        assert_eq!(elevation_char(20), 'M');
    }
}
