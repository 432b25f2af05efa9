use anyhow::{Context, Result};
use clap::Parser;
use ecosim_lib::model::config::AppConfig;
use ecosim_lib::model::metrics::init_logging;
use ecosim_lib::model::world::World;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Simulation definition JSON (defaults to the config's default_simulation)
    #[arg(short, long)]
    simulation: Option<String>,

    /// Directory holding <Species>.json files
    #[arg(long)]
    species_dir: Option<String>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Seconds per tick (defaults to the config's fixed_dt)
    #[arg(long)]
    dt: Option<f64>,

    /// Overrides the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(path: &str) -> Result<AppConfig> {
    if !Path::new(path).exists() {
        tracing::warn!(path, "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    AppConfig::from_toml(&content).with_context(|| format!("parsing {path}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = load_config(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    let simulation = args
        .simulation
        .unwrap_or_else(|| config.simulation.default_simulation.clone());
    let species_dir = args
        .species_dir
        .unwrap_or_else(|| config.simulation.definitions_dir.clone());
    let dt = args.dt.unwrap_or(config.simulation.fixed_dt);

    let (mut world, report) = match World::from_files(config, &simulation, &species_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(
                error = %format!("{e:#}"),
                simulation = %simulation,
                "Failed to load simulation"
            );
            return Err(e);
        }
    };
    for skipped in &report.skipped {
        tracing::warn!(%skipped, "Species skipped");
    }

    println!("Running {} ticks headless...", args.ticks);
    for _ in 0..args.ticks {
        if !world.is_running() {
            break;
        }
        world.tick(dt);
    }

    println!(
        "Headless simulation finished: {} ticks, {} entities, last tick {:?}.",
        world.tick,
        world.population(),
        world.metrics.last_tick()
    );
    Ok(())
}
