use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use island_generator::ascii;
use island_generator::config::MapConfig;
use island_generator::islands;
use island_generator::map;
use island_generator::objects;
use island_generator::persistence;
use island_generator::render;
use island_generator::seeds::MapSeeds;

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate layered island maps with cellular automata")]
struct Args {
    /// Width of one sub-map in cells
    #[arg(short = 'W', long, default_value = "48")]
    width: usize,

    /// Height of one sub-map in cells
    #[arg(short = 'H', long, default_value = "48")]
    height: usize,

    /// Size of the sub-map grid (1-4), e.g. 2 = a 2x2 grid of sub-maps
    #[arg(short, long, default_value = "2")]
    grid_size: usize,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Minimum number of cells for an island to survive
    #[arg(long, default_value = "12")]
    min_land: usize,

    /// Minimum number of cells for a water pocket to survive
    #[arg(long, default_value = "8")]
    min_water: usize,

    /// Save the generated map into this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Load a previously saved map instead of generating one
    #[arg(long)]
    load: Option<PathBuf>,

    /// Export a PNG preview to this path
    #[arg(long)]
    png: Option<PathBuf>,

    /// PNG scale factor (pixels per cell)
    #[arg(long, default_value = "4")]
    png_scale: u32,

    /// Show the island id map instead of the terrain preview
    #[arg(long)]
    show_islands: bool,

    /// Skip the ASCII preview
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = MapConfig {
        grid_size: args.grid_size,
        map_width: args.width,
        map_height: args.height,
        minimum_land_tiles: args.min_land,
        minimum_water_tiles: args.min_water,
        ..MapConfig::default()
    };

    if let Some(path) = &args.load {
        return show_loaded_map(path, &args, &config);
    }

    config.validate()?;
    for warning in config.warnings() {
        eprintln!("Warning: {}", warning);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let seeds = MapSeeds::from_master(seed);

    println!("Generating map with seed: {}", seed);
    println!(
        "Map size: {}x{} ({}x{} grid of {}x{} sub-maps)",
        config.full_width(),
        config.full_height(),
        config.grid_size,
        config.grid_size,
        config.map_width,
        config.map_height
    );

    let rules = objects::default_rules();
    let data = map::generate(&config, &rules, seeds)?;

    println!("Retained {} islands", data.islands.len());
    for island in &data.islands {
        println!("  island {}: {} cells", island.id.0, island.size());
    }
    println!("Placed {} objects", data.placements.len());

    if !args.quiet {
        if args.show_islands {
            let partition = islands::IslandPartition {
                islands: data.islands.clone(),
                id_map: data.island_map.clone(),
            };
            print!("{}", ascii::render_islands(&partition));
        } else {
            print!("{}", ascii::render_grid(&data.grid));
        }
    }

    if let Some(dir) = &args.save_dir {
        let path = persistence::save_map(&data.grid, dir)?;
        println!("Map saved to: {}", path.display());
    }

    if let Some(path) = &args.png {
        render::export_png(&data.grid, path, args.png_scale)?;
        println!("PNG preview written to: {}", path.display());
    }

    Ok(())
}

/// Load a saved grid and re-run object placement on it. The grid itself is
/// shown and exported exactly as saved; island reclassification already ran
/// before the save, so it is not applied again here.
fn show_loaded_map(path: &PathBuf, args: &Args, config: &MapConfig) -> Result<(), Box<dyn Error>> {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let grid = persistence::load_map(path)?;
    println!("Loaded {}x{} map from {}", grid.width, grid.height, path.display());

    let seeds = MapSeeds::from_master(args.seed.unwrap_or_else(rand::random));
    let mut object_rng = ChaCha8Rng::seed_from_u64(seeds.objects);
    let placements = objects::place(&grid, &objects::default_rules(), &mut object_rng);
    println!("Placed {} objects", placements.len());

    if !args.quiet {
        if args.show_islands {
            // partition mutates its input, so the island view works on a
            // scratch copy.
            let mut scratch = grid.clone();
            let partition = islands::partition(&mut scratch, config);
            println!("Retained {} islands", partition.islands.len());
            print!("{}", ascii::render_islands(&partition));
        } else {
            print!("{}", ascii::render_grid(&grid));
        }
    }

    if let Some(png) = &args.png {
        render::export_png(&grid, png, args.png_scale)?;
        println!("PNG preview written to: {}", png.display());
    }

    Ok(())
}
