//! reelspin: a three-reel slot machine for the Windows desktop
//!
//! The animation and spin logic live in platform-independent modules; only
//! the window shell and its dialogs touch Win32. The `simulate` command drives
//! the same controller headlessly on any platform.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod domain;
#[cfg(windows)]
mod platform;
// Rendering and textures are only driven by the Windows shell.
#[cfg_attr(not(windows), allow(dead_code))]
mod ui;

use app::AppError;
use app::controller::SlotController;
use config::MachineConfig;

fn main() -> Result<(), AppError> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let rng = seeded_rng(cli.seed);
    let controller = SlotController::new(&config, rng)?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_play(&config, controller),
        Commands::Simulate { spins, frame_ms } => {
            let frame_ms = frame_ms.unwrap_or(config.tick_interval_ms);
            run_simulate(controller, spins, frame_ms);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<MachineConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading machine config");
            MachineConfig::load(path)?
        }
        None => MachineConfig::default(),
    };

    if let Some(assets) = &cli.assets {
        config.assets_dir = assets.clone();
    }

    config.validate()?;
    Ok(config)
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            tracing::info!(seed, "using fixed RNG seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}

#[cfg(windows)]
fn run_play(config: &MachineConfig, controller: SlotController<StdRng>) -> Result<(), AppError> {
    tracing::info!(assets = %config.assets_dir.display(), "starting slot machine");
    ui::SlotWindow::run(config, controller)?;
    Ok(())
}

#[cfg(not(windows))]
fn run_play(_config: &MachineConfig, _controller: SlotController<StdRng>) -> Result<(), AppError> {
    Err(AppError::UnsupportedPlatform)
}

fn run_simulate(mut controller: SlotController<StdRng>, spins: u64, frame_ms: u32) {
    tracing::info!(spins, frame_ms, cycles = controller.cycles(), "running headless simulation");
    let report = app::simulate::run(&mut controller, spins, Duration::from_millis(u64::from(frame_ms)));
    println!("{report}");
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Three-reel slot machine", long_about = None)]
struct Cli {
    /// JSON file overriding the machine defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the symbol images.
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Fixed seed for reproducible spins.
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the slot machine window (default).
    Play,
    /// Pull the lever repeatedly without a window and report the results.
    Simulate {
        /// Number of spins to run.
        #[arg(long, default_value_t = 1000)]
        spins: u64,
        /// Simulated milliseconds per tick; defaults to the timer interval.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        frame_ms: Option<u32>,
    },
}
