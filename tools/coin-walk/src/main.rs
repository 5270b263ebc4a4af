use anyhow::{bail, Context, Result};
use clap::Parser;
use coin_field_core::prelude::*;
use geo::Point;
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod walk;

use walk::{simulate, WalkPlan};

#[derive(Parser, Debug)]
#[command(
    name = "coin-walk",
    author,
    version,
    about = "Simulate a player walking a coin field",
    long_about = "Drives the coin field controller with a synthetic walk against an in-memory \
                  map. The player heads for the nearest coin in fixed strides, so every coin \
                  placed is eventually reached.\n\n\
                  Useful for checking configuration changes without a device."
)]
struct Args {
    /// Starting latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Starting longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Number of position readings to simulate
    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Meters walked between readings
    #[arg(long, default_value_t = 20.0)]
    step_m: f64,

    /// Probability (0-1) that a reading has no fix
    #[arg(long, default_value_t = 0.0)]
    dropout: f64,

    /// Seed for coin placement and dropouts (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with coin field settings; missing keys use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .without_time()
        .init();

    if !(-90.0..=90.0).contains(&args.lat) || !(-180.0..=180.0).contains(&args.lng) {
        bail!("Start position out of range: lat {}, lng {}", args.lat, args.lng);
    }
    if !(args.step_m.is_finite() && args.step_m > 0.0) {
        bail!("--step-m must be a positive number of meters (got {})", args.step_m);
    }
    if !(0.0..=1.0).contains(&args.dropout) {
        bail!("--dropout must be between 0 and 1 (got {})", args.dropout);
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CoinFieldConfig::default(),
    };

    let (placement_rng, mut walker) = match args.seed {
        Some(seed) => (StdRng::seed_from_u64(seed), StdRng::seed_from_u64(seed ^ 0x5eed)),
        None => (StdRng::from_os_rng(), StdRng::from_os_rng()),
    };

    let mut controller =
        CoinFieldController::new(config, placement_rng).context("Invalid coin field config")?;
    let mut surface = InMemorySurface::new();

    tracing::info!("=== Coin Walk ===");
    tracing::info!("Start: {:.5}, {:.5}", args.lat, args.lng);
    tracing::info!(
        "Field: {} coins within {} m, collected under {} m ({})",
        controller.config().max_coins,
        controller.config().spawn_radius_m,
        controller.config().collection_radius_m,
        controller.config().distance_metric
    );

    let plan = WalkPlan {
        start: Point::new(args.lng, args.lat),
        steps: args.steps,
        step_m: args.step_m,
        dropout: args.dropout,
    };
    let report = simulate(&plan, &mut controller, &mut surface, &mut walker);

    tracing::info!("");
    tracing::info!("Readings: {} ({} without fix)", report.readings, report.missed_fixes);
    tracing::info!("Walked: {:.0} m", report.distance_m);
    tracing::info!("Coins placed: {}", report.placed);
    tracing::info!("Coins collected: {}", report.collected);
    tracing::info!("Live coins: {}", controller.field().len());
    if let Some(end) = report.final_position {
        tracing::info!("End: {:.5}, {:.5}", end.y(), end.x());
    }
    tracing::info!("{}", controller.score());

    Ok(())
}

fn load_config(path: &Path) -> Result<CoinFieldConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: CoinFieldConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}
