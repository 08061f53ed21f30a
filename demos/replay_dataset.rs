//! Real-time dataset replay example
//!
//! Loads a recorded dataset, replays it on a background thread and consumes
//! the frames on the main thread as a downstream subscriber would.
//!
//! Usage:
//!   cargo run --example replay_dataset -- <dataset_root> [speed]

use rig_data::{DatasetConfig, load_dataset};
use rig_replay::{ChannelEmitter, ReplayConfig, ReplayPlayer, ReplayThread};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("Please provide a dataset root directory")?;
    let speed = match std::env::args().nth(2) {
        Some(speed) => speed.parse::<f64>()?,
        None => 1.0,
    };

    let index = Arc::new(load_dataset(&DatasetConfig::new(&root))?);
    info!(
        "Loaded {} samples spanning {:.2}s",
        index.len(),
        index.duration().as_secs_f64()
    );

    let (emitter, frames) = ChannelEmitter::new();
    let player = ReplayPlayer::new(index, &ReplayConfig::default().with_speed(speed), emitter)?;

    let started = Instant::now();
    let replay = ReplayThread::spawn(player)?;

    let mut depth_pixels = 0u64;
    for frame in frames {
        if let Some(depth) = &frame.depth {
            depth_pixels += u64::from(depth.width()) * u64::from(depth.height());
        }
        info!(
            "t={:.3}s wall={:.3}s color={} pose={}",
            frame.timestamp().as_secs_f64(),
            started.elapsed().as_secs_f64(),
            frame.has_color(),
            frame.position.is_some()
        );
    }

    let report = replay.join()?;
    info!(
        "Replay finished in {:.2}s: {} frames ({} depth pixels), {} skipped, {} late",
        started.elapsed().as_secs_f64(),
        report.stats.emitted,
        depth_pixels,
        report.stats.skipped,
        report.stats.late
    );
    Ok(())
}
