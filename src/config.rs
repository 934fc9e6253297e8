//! Map generation configuration
//!
//! Every numeric parameter has a documented `[min, max]` range and is clamped
//! whenever it is assigned, including when a config is loaded from JSON.
//! Configs are saved by name as pretty-printed JSON files in a directory.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::coords::Direction;
use crate::error::{MapError, Result};

/// Which latitudes the map spans; drives the temperature gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hemisphere {
    /// Equator in the middle row, poles at the top and bottom
    #[default]
    Both,
    /// Equator at the bottom row, pole at the top
    North,
    /// Pole at the bottom row, equator at the top
    South,
}

impl Hemisphere {
    /// Parse from string (for CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "both" => Some(Self::Both),
            "north" | "n" => Some(Self::North),
            "south" | "s" => Some(Self::South),
            _ => None,
        }
    }
}

/// Range metadata for one numeric parameter, for editors and sliders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub min: f64,
    pub default: f64,
    pub max: f64,
}

/// Clamp into `[min, max]`. Values that do not compare (NaN) become `min`.
fn clamp_param<T: PartialOrd>(value: T, min: T, max: T) -> T {
    match value.partial_cmp(&min) {
        Some(Ordering::Less) | None => min,
        _ if value > max => max,
        _ => value,
    }
}

macro_rules! map_config {
    (
        settings {
            $( $(#[doc = $sdoc:literal])* $sfield:ident : $sty:ty = $sdefault:expr; )*
        }
        clamped {
            $( $(#[doc = $cdoc:literal])* $cfield:ident / $setter:ident : $cty:ty = $cdefault:expr, [$min:expr, $max:expr]; )*
        }
    ) => {
        /// Full parameter set for one map generation run.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(from = "MapConfigRecord", into = "MapConfigRecord")]
        pub struct MapConfig {
            $( $(#[doc = $sdoc])* pub $sfield: $sty, )*
            $( $cfield: $cty, )*
        }

        /// On-disk shape of [`MapConfig`]. Missing fields take their defaults.
        #[derive(Clone, Debug, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        struct MapConfigRecord {
            $( $sfield: $sty, )*
            $( $cfield: $cty, )*
        }

        impl Default for MapConfigRecord {
            fn default() -> Self {
                Self {
                    $( $sfield: $sdefault, )*
                    $( $cfield: $cdefault, )*
                }
            }
        }

        impl Default for MapConfig {
            fn default() -> Self {
                MapConfigRecord::default().into()
            }
        }

        impl From<MapConfigRecord> for MapConfig {
            fn from(record: MapConfigRecord) -> Self {
                Self {
                    $( $sfield: record.$sfield, )*
                    $( $cfield: clamp_param(record.$cfield, $min, $max), )*
                }
            }
        }

        impl From<MapConfig> for MapConfigRecord {
            fn from(config: MapConfig) -> Self {
                Self {
                    $( $sfield: config.$sfield, )*
                    $( $cfield: config.$cfield, )*
                }
            }
        }

        impl MapConfig {
            $(
                $(#[doc = $cdoc])*
                pub fn $cfield(&self) -> $cty {
                    self.$cfield
                }

                pub fn $setter(&mut self, value: $cty) -> &mut Self {
                    self.$cfield = clamp_param(value, $min, $max);
                    self
                }
            )*

            /// Range table of every clamped parameter.
            pub const PARAMETERS: &'static [ParamInfo] = &[
                $( ParamInfo {
                    name: stringify!($cfield),
                    min: $min as f64,
                    default: $cdefault as f64,
                    max: $max as f64,
                }, )*
            ];
        }
    };
}

map_config! {
    settings {
        /// Wrap the map horizontally (east-west)
        wrapping: bool = false;
        /// Use `seed` instead of drawing a fresh one
        use_fixed_seed: bool = false;
        seed: u64 = 0;
        /// Direction the prevailing wind blows from
        wind_direction: Direction = Direction::NW;
        hemisphere: Hemisphere = Hemisphere::Both;
    }
    clamped {
        /// Map width in cells (rounded up to the chunk size by the grid)
        width / set_width: usize = 20, [5, 1000];
        /// Map height in cells (rounded up to the chunk size by the grid)
        height / set_height: usize = 15, [5, 1000];
        /// Chance that a raised/sunk cell's neighbour gets a priority penalty
        jitter_probability / set_jitter_probability: f32 = 0.25, [0.0, 0.5];
        chunk_size_min / set_chunk_size_min: usize = 30, [20, 200];
        chunk_size_max / set_chunk_size_max: usize = 100, [20, 200];
        /// Percentage of cells that should end up above water
        land_percentage / set_land_percentage: u32 = 50, [5, 95];
        water_level / set_water_level: i32 = 3, [1, 5];
        /// Chance that a chunk is raised or sunk by two steps instead of one
        high_rise_probability / set_high_rise_probability: f32 = 0.25, [0.0, 1.0];
        sink_probability / set_sink_probability: f32 = 0.2, [0.0, 0.4];
        elevation_min / set_elevation_min: i32 = -2, [-4, 0];
        elevation_max / set_elevation_max: i32 = 8, [6, 10];
        map_border_x / set_map_border_x: usize = 5, [0, 10];
        map_border_z / set_map_border_z: usize = 5, [0, 10];
        region_border / set_region_border: usize = 5, [0, 10];
        region_count / set_region_count: usize = 1, [1, 4];
        /// Percentage of initially erodible cells to wear down
        erosion_percentage / set_erosion_percentage: u32 = 50, [0, 100];
        evaporation_factor / set_evaporation_factor: f32 = 0.5, [0.0, 1.0];
        precipitation_factor / set_precipitation_factor: f32 = 0.25, [0.0, 1.0];
        runoff_factor / set_runoff_factor: f32 = 0.25, [0.0, 1.0];
        seepage_factor / set_seepage_factor: f32 = 0.125, [0.0, 1.0];
        wind_strength / set_wind_strength: f32 = 4.0, [1.0, 10.0];
        starting_moisture / set_starting_moisture: f32 = 0.1, [0.0, 1.0];
        /// River cells as a percentage of land cells
        river_percentage / set_river_percentage: u32 = 10, [0, 20];
        extra_lake_probability / set_extra_lake_probability: f32 = 0.25, [0.0, 1.0];
        low_temperature / set_low_temperature: f32 = 0.0, [0.0, 1.0];
        high_temperature / set_high_temperature: f32 = 1.0, [0.0, 1.0];
        temperature_jitter / set_temperature_jitter: f32 = 0.1, [0.0, 1.0];
    }
}

impl MapConfig {
    /// Config for a map of the given size, everything else at defaults.
    pub fn with_size(width: usize, height: usize) -> Self {
        let mut config = Self::default();
        config.set_width(width).set_height(height);
        config
    }

    /// Fix the seed so generation is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.use_fixed_seed = true;
        self.seed = seed;
        self
    }

    /// Chunk size bounds in ascending order, whatever order they were set in.
    pub fn chunk_size_range(&self) -> (usize, usize) {
        let (a, b) = (self.chunk_size_min, self.chunk_size_max);
        (a.min(b), a.max(b))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write this config to `<dir>/<name>.json`, creating `dir` if needed.
    pub fn save(&self, dir: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
        let path = config_path(dir.as_ref(), name)?;
        fs::create_dir_all(dir.as_ref())?;
        fs::write(&path, self.to_json()?)?;
        debug!("Saved map config to {}", path.display());
        Ok(path)
    }

    /// Read `<dir>/<name>.json`.
    pub fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = config_path(dir.as_ref(), name)?;
        let json = fs::read_to_string(&path)?;
        debug!("Loaded map config from {}", path.display());
        Self::from_json(&json)
    }
}

/// Names of the configs saved in `dir`, sorted. A missing directory has none.
pub fn list_saved_configs(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn config_path(dir: &Path, name: &str) -> Result<PathBuf> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '));
    if !valid {
        return Err(MapError::InvalidConfigName(name.to_string()));
    }
    Ok(dir.join(format!("{}.json", name)))
}
