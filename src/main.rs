//! Headless runner: loads a level, ticks it with fixed input, and logs the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dustbowl::{
    init_logging, Action, AssetLoader, CueLog, DirectoryAssetLoader, InputSnapshot, JsonLevel,
    MapSource, Outcome, Simulation, SimulationConfig, UniformAssets,
};
use log::{debug, info};

/// Runs a level headless and logs what happened
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Level file to load
    #[arg(long)]
    level: PathBuf,
    /// Animation tree root; placeholder clips are used when omitted
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Simulation config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Actions held for the whole run (right, left, up, down, attack)
    #[arg(long, value_delimiter = ',')]
    hold: Vec<Action>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => SimulationConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let layout = JsonLevel::new(&args.level)
        .load()
        .with_context(|| format!("loading level {}", args.level.display()))?;
    let assets: Box<dyn AssetLoader> = match &args.assets {
        Some(root) => Box::new(DirectoryAssetLoader::new(root)),
        None => Box::new(UniformAssets::default()),
    };
    let mut simulation =
        Simulation::from_level(&layout, assets.as_ref(), config).context("building level")?;

    let input = InputSnapshot::holding(&args.hold);
    let mut audio = CueLog::default();
    for _ in 0..args.ticks {
        let report = simulation.tick(args.dt, &input, &mut audio);
        if !report.monsters_removed.is_empty() {
            debug!("removed monsters {:?}", report.monsters_removed);
        }
        if report.outcome == Outcome::PlayerDied {
            break;
        }
    }

    info!(
        "{:?} after {} ticks: player health {}, {} monsters left, {} cues played",
        simulation.outcome(),
        simulation.ticks(),
        simulation.player().body().health,
        simulation.monsters().len(),
        audio.cues.len()
    );
    Ok(())
}
