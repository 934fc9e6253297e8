use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use hexmap_generator::ascii::{self, AsciiMode};
use hexmap_generator::config::list_saved_configs;
use hexmap_generator::export::{self, PreviewMode};
use hexmap_generator::{Direction, Hemisphere, MapConfig, MapGenerator, Terrain};

#[derive(Parser, Debug)]
#[command(name = "hexmap_generator")]
#[command(about = "Generate procedural hex maps with landmasses, climate and rivers")]
struct Args {
    /// Width of the map in cells (rounded up to a multiple of 5)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in cells (rounded up to a multiple of 5)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Wrap the map east-west
    #[arg(long)]
    wrap: bool,

    /// Number of land regions (1-4)
    #[arg(short = 'r', long)]
    regions: Option<usize>,

    /// Percentage of the map above water (5-95)
    #[arg(short = 'l', long)]
    land: Option<u32>,

    /// Direction the prevailing wind blows from (NE, E, SE, SW, W, NW)
    #[arg(long)]
    wind: Option<String>,

    /// Hemisphere the map covers (both, north, south)
    #[arg(long)]
    hemisphere: Option<String>,

    /// Load a saved config by name before applying other flags
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding saved configs
    #[arg(long, default_value = "configs")]
    config_dir: PathBuf,

    /// Save the effective config under this name
    #[arg(long)]
    save_config: Option<String>,

    /// List saved configs and exit
    #[arg(long)]
    list_configs: bool,

    /// Export a PNG preview to this file
    #[arg(long)]
    png: Option<PathBuf>,

    /// What the PNG preview shows (terrain, elevation, moisture)
    #[arg(long, default_value = "terrain")]
    png_mode: String,

    /// Print the map as ASCII (terrain, elevation, moisture, rivers)
    #[arg(long)]
    ascii: Option<String>,
}

fn build_config(args: &Args) -> hexmap_generator::Result<MapConfig> {
    let mut config = match &args.config {
        Some(name) => MapConfig::load(&args.config_dir, name)?,
        None => MapConfig::default(),
    };
    if let Some(width) = args.width {
        config.set_width(width);
    }
    if let Some(height) = args.height {
        config.set_height(height);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.wrap {
        config.wrapping = true;
    }
    if let Some(regions) = args.regions {
        config.set_region_count(regions);
    }
    if let Some(land) = args.land {
        config.set_land_percentage(land);
    }
    if let Some(wind) = args.wind.as_deref() {
        match Direction::from_str(wind) {
            Some(direction) => config.wind_direction = direction,
            None => eprintln!("Unknown wind direction '{}', keeping {}", wind, config.wind_direction),
        }
    }
    if let Some(hemisphere) = args.hemisphere.as_deref() {
        match Hemisphere::from_str(hemisphere) {
            Some(h) => config.hemisphere = h,
            None => eprintln!("Unknown hemisphere '{}', keeping {:?}", hemisphere, config.hemisphere),
        }
    }
    Ok(config)
}

fn run(args: &Args) -> hexmap_generator::Result<()> {
    if args.list_configs {
        let names = list_saved_configs(&args.config_dir)?;
        println!("Saved configs in {}:", args.config_dir.display());
        for name in names {
            println!("  {}", name);
        }
        return Ok(());
    }

    let config = build_config(args)?;
    if let Some(name) = &args.save_config {
        let path = config.save(&args.config_dir, name)?;
        println!("Saved config to {}", path.display());
    }

    let generator = MapGenerator::new(config);
    let map = generator.generate_with_progress(|stage| println!("{}...", stage.name()))?;
    let grid = &map.grid;
    let report = &map.report;

    println!("Seed: {}", map.seed);
    println!("Map size: {}x{} ({} cells)", grid.width(), grid.height(), grid.len());
    println!(
        "Land: {} cells ({:.1}%), requested {}",
        report.final_land_cells,
        100.0 * report.final_land_cells as f64 / grid.len() as f64,
        report.land.requested_land_cells
    );
    println!(
        "Erosion: {} moves, erodible cells {} -> {}",
        report.erosion.steps, report.erosion.initial_erodible, report.erosion.final_erodible
    );
    println!(
        "Rivers: {} rivers, {} lakes, {} of {} river cells unplaced",
        report.rivers.rivers, report.rivers.lakes, report.rivers.remaining_budget, report.rivers.budget
    );
    for terrain in [Terrain::Sand, Terrain::Grass, Terrain::Mud, Terrain::Stone, Terrain::Snow] {
        let count = grid
            .cells()
            .iter()
            .filter(|c| !c.is_underwater() && c.terrain == terrain)
            .count();
        println!("  {:<6} {}", terrain.display_name(), count);
    }

    if let Some(mode) = args.ascii.as_deref() {
        match AsciiMode::from_str(mode) {
            Some(mode) => {
                println!();
                print!("{}", ascii::render_ascii(grid, &map.climate, mode));
                if mode == AsciiMode::Terrain {
                    print!("{}", ascii::terrain_legend());
                }
            }
            None => eprintln!("Unknown ASCII mode '{}'", mode),
        }
    }

    if let Some(path) = &args.png {
        let mode = PreviewMode::from_str(&args.png_mode).unwrap_or_else(|| {
            eprintln!("Unknown PNG mode '{}', using terrain", args.png_mode);
            PreviewMode::Terrain
        });
        match export::export_png(grid, &map.climate, mode, path) {
            Ok(()) => println!("Exported {} preview to {}", mode.name().to_lowercase(), path.display()),
            Err(e) => eprintln!("Failed to export {}: {}", path.display(), e),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
