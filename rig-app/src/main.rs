//! Rig Replay
//!
//! Replays a recorded sensor dataset at its recorded cadence and logs every
//! emitted frame.

mod app;
mod config;
mod error;

use clap::Parser;
use config::{AppConfig, Overrides};
use std::path::PathBuf;

/// Rig Replay - real-time playback of recorded sensor datasets
#[derive(Parser, Debug)]
#[command(name = "rig-replay")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dataset root directory
    #[arg(short, long, env = "RIG_DATA")]
    dataset: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Playback speed multiplier
    #[arg(short, long)]
    speed: Option<f64>,

    /// Record file name inside the dataset root
    #[arg(long)]
    record_file: Option<String>,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config.apply(Overrides {
            dataset: args.dataset,
            record_file: args.record_file,
            speed: args.speed,
            log_level: args.log_level,
        }),
        Err(e) => {
            eprintln!("Application error: {}", e);
            std::process::exit(1);
        }
    };

    app::init_logging(&config.log_level);

    if let Err(e) = app::run(&config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
