use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use slant_blocks::{Block, BlockRegistry};
use slant_color::Color;
use slant_lighting::{AngledLighting, LightBlockers, WorldEnv};
use slant_world::{WorldGrid, generate_world};

mod config;
mod report;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "slant")]
#[command(about = "Angled sun lighting for voxel worlds", long_about = None)]
struct Cli {
    /// World and environment settings
    #[arg(long, default_value = "assets/slant.toml")]
    config: PathBuf,

    /// Block definitions
    #[arg(long, default_value = "assets/blocks.toml")]
    blocks: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a lit/shadow cross-section of the generated world
    Slice {
        #[arg(long, default_value_t = 0)]
        z: usize,
    },
    /// Count lit and shadowed voxels
    Stats,
    /// Place a block, update lighting incrementally and check it against a full recompute
    Edit { x: i32, y: i32, z: i32, block: String },
    /// Print the face palette, optionally after changing the env colors
    Palette {
        #[arg(long)]
        sun: Option<Color>,
        #[arg(long)]
        shadow: Option<Color>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let reg = BlockRegistry::load_from_path(&cli.blocks)?;
    let cfg = AppConfig::load_or_default(&cli.config)?;
    let mut env = WorldEnv::with_colors(cfg.env.sunlight, cfg.env.shadowlight);
    let mut lighting = AngledLighting::new();
    lighting.init(&mut env);

    match cli.command {
        Commands::Palette { sun, shadow } => {
            if let Some(c) = sun {
                env.set_sunlight(c);
            }
            if let Some(c) = shadow {
                env.set_shadowlight(c);
            }
            let applied = lighting.poll_env();
            log::debug!("applied {} env changes", applied);
            print!("{}", report::palette_table(lighting.palette()));
        }
        Commands::Slice { z } => {
            let grid = load_world(&cfg, &reg, &mut lighting)?;
            if z >= grid.length {
                return Err(format!("z={} is outside the world (length {})", z, grid.length).into());
            }
            print!("{}", report::slice(&lighting, &grid, &reg, z));
        }
        Commands::Stats => {
            let grid = load_world(&cfg, &reg, &mut lighting)?;
            let (w, h, l) = grid.dims();
            println!("world {}x{}x{} ({} voxels)", w, h, l, w * h * l);
            println!("{}", report::LightStats::collect(&lighting, &grid, &reg));
        }
        Commands::Edit { x, y, z, block } => {
            let mut grid = load_world(&cfg, &reg, &mut lighting)?;
            let id = reg.id_by_name(&block).ok_or_else(|| format!("unknown block {:?}", block))?;
            let new = Block::from_id(id);
            let mut reference = lighting.depths().cloned().ok_or("lighting was not loaded")?;
            let old = grid.set_block(x, y, z, new).ok_or_else(|| {
                let (w, h, l) = grid.dims();
                format!("({}, {}, {}) is outside the {}x{}x{} world", x, y, z, w, h, l)
            })?;

            let changed = lighting.notify_block_changed(&grid, &reg, x, y, z, old, new);
            let name = |b: Block| reg.get(b.id).map(|t| t.name.as_str()).unwrap_or("?");
            println!("({}, {}, {}) {} -> {}: {} cells changed", x, y, z, name(old), name(new), changed.len());
            if let Some(d) = lighting.depths() {
                for &(u, v) in &changed {
                    println!("  cell ({}, {}) depth={}", u, v, d.get(u, v));
                }
            }

            let (w, _, l) = grid.dims();
            reference.compute_region(&LightBlockers::new(&grid, &reg), 0, 0, w, l);
            if lighting.depths() != Some(&reference) {
                return Err("incremental update diverged from full recompute".into());
            }
            println!("matches full recompute");
        }
    }
    lighting.dispose();
    Ok(())
}

fn load_world(
    cfg: &AppConfig,
    reg: &BlockRegistry,
    lighting: &mut AngledLighting,
) -> Result<WorldGrid, Box<dyn Error>> {
    let t0 = Instant::now();
    let grid = generate_world(&cfg.world, reg)?;
    let gen_ms = t0.elapsed().as_millis();
    let t1 = Instant::now();
    lighting.on_world_loaded(&grid, reg);
    log::info!(
        target: "perf",
        "ms gen={} light={} world_load dims=({}, {}, {}) seed={}",
        gen_ms,
        t1.elapsed().as_millis(),
        grid.width,
        grid.height,
        grid.length,
        cfg.world.seed
    );
    Ok(grid)
}
