//! Profiling tool to identify slow generation passes

use std::time::{Duration, Instant};

use hexmap_generator::biomes::BiomeClassifier;
use hexmap_generator::climate::ClimateSimulator;
use hexmap_generator::erosion::ErosionSimulator;
use hexmap_generator::regions::RegionPartitioner;
use hexmap_generator::rivers::RiverBuilder;
use hexmap_generator::tectonics::TerrainGenerator;
use hexmap_generator::{Grid, MapConfig, MapSeed};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let width = 320;
    let height = 240;
    let seed = MapSeed::new(1337);

    let mut config = MapConfig::with_size(width, height).with_seed(seed.value());
    config.set_region_count(4);

    println!("=== Performance Profiling ===");
    println!("Map size: {}x{} ({} cells)", width, height, width * height);
    println!();

    let mut rng = seed.rng();
    let mut timings: Vec<(&str, Duration)> = Vec::new();

    let start = Instant::now();
    let mut grid = Grid::new(config.width(), config.height(), config.wrapping);
    for cell in grid.cells_mut() {
        cell.water_level = config.water_level();
    }
    let regions = RegionPartitioner::new(&config, &grid).partition(&mut rng);
    timings.push(("Grid + regions", start.elapsed()));

    let start = Instant::now();
    let land = TerrainGenerator::new(&config, grid.len()).create_land(&mut grid, &regions, &mut rng);
    timings.push(("Land", start.elapsed()));
    println!(
        "Land: {} of {} cells in {} rounds",
        land.actual_land_cells, land.requested_land_cells, land.rounds
    );

    let start = Instant::now();
    let erosion = match ErosionSimulator::new(&config).run(&mut grid, &mut rng) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Erosion failed: {}", e);
            return;
        }
    };
    timings.push(("Erosion", start.elapsed()));
    println!("Erosion: {} moves", erosion.steps);

    let start = Instant::now();
    let simulator = ClimateSimulator::new(&config);
    let mut climate = simulator.run(&grid);
    timings.push(("Climate", start.elapsed()));

    let start = Instant::now();
    let rivers = match RiverBuilder::new(&config).create_rivers(&mut grid, &climate, land.actual_land_cells, &mut rng) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("River generation failed: {}", e);
            return;
        }
    };
    timings.push(("Rivers", start.elapsed()));
    println!("Rivers: {} rivers, {} lakes", rivers.rivers, rivers.lakes);

    let start = Instant::now();
    simulator.assign_temperatures(&grid, &mut climate, &mut rng);
    BiomeClassifier::new(&config).classify(&mut grid, &climate);
    timings.push(("Temperature + biomes", start.elapsed()));

    // Summary
    let total: Duration = timings.iter().map(|(_, t)| *t).sum();
    println!("\n=== Summary ===");
    for (name, time) in &timings {
        println!(
            "{:<22} {:>8.2}% ({:?})",
            format!("{}:", name),
            100.0 * time.as_secs_f64() / total.as_secs_f64().max(f64::EPSILON),
            time
        );
    }
    println!("─────────────────────────────────");
    println!("{:<22} {:>8}  {:?}", "TOTAL:", "100%", total);
}
