//! Wiring of loader, player and emitter for the command-line replay.

use crate::config::AppConfig;
use crate::error::AppError;
use rig_data::load_dataset;
use rig_replay::{ReplayError, ReplayFrame, ReplayPlayer, ReplayReport, ReplayThread, SampleEmitter};
use std::sync::Arc;
use tracing::info;

/// Emitter that reports every frame to the log.
#[derive(Debug, Default)]
pub struct LogEmitter {
    frames: u64,
}

impl LogEmitter {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl SampleEmitter for LogEmitter {
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError> {
        self.frames += 1;

        let depth = frame
            .depth
            .as_ref()
            .map(|d| format!("{}x{}", d.width(), d.height()))
            .unwrap_or_else(|| "-".to_string());
        let color = frame
            .color
            .as_ref()
            .map(|c| format!("{}x{}", c.width(), c.height()))
            .unwrap_or_else(|| "-".to_string());

        match frame.position {
            Some(p) => info!(
                "Frame {} at {:.6}s: depth {}, color {}, position ({:.3}, {:.3}, {:.3})",
                self.frames,
                frame.timestamp().as_secs_f64(),
                depth,
                color,
                p.x,
                p.y,
                p.z
            ),
            None => info!(
                "Frame {} at {:.6}s: depth {}, color {}, no pose",
                self.frames,
                frame.timestamp().as_secs_f64(),
                depth,
                color
            ),
        }
        Ok(())
    }
}

/// Initialize the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

/// Load the dataset and replay it to the log until it ends.
pub fn run(config: &AppConfig) -> Result<ReplayReport, AppError> {
    config.validate()?;

    let index = Arc::new(load_dataset(&config.dataset)?);
    let player = ReplayPlayer::new(index, &config.replay, LogEmitter::default())?;

    info!("Replaying at {}x speed", config.replay.speed);
    let report = ReplayThread::spawn(player)?.join()?;

    info!(
        "Replay finished: {} emitted, {} skipped, {} late",
        report.stats.emitted, report.stats.skipped, report.stats.late
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;
    use rig_data::DatasetError;
    use rig_replay::LoopOutcome;

    #[test]
    fn test_log_emitter_counts_frames() {
        let mut emitter = LogEmitter::default();
        for timestamp_ns in [1, 2, 3] {
            emitter
                .emit(ReplayFrame {
                    color: None,
                    depth: None,
                    position: None,
                    orientation: None,
                    timestamp_ns,
                })
                .unwrap();
        }
        assert_eq!(emitter.frames(), 3);
    }

    #[test]
    fn test_run_without_root_fails_before_loading() {
        assert!(matches!(run(&AppConfig::default()), Err(AppError::Config(_))));
    }

    #[test]
    fn test_run_with_missing_dataset_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default().apply(Overrides {
            dataset: Some(dir.path().join("absent")),
            ..Default::default()
        });
        assert!(matches!(
            run(&config),
            Err(AppError::Dataset(DatasetError::MissingRoot(_)))
        ));
    }

    #[test]
    fn test_run_replays_pose_only_dataset_to_the_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("file.csv"),
            "0.001,0,0,0,0,0,0,1\n0.002,1,1,1,0,0,0,1\n",
        )
        .unwrap();

        let config = AppConfig::default().apply(Overrides {
            dataset: Some(dir.path().to_path_buf()),
            ..Default::default()
        });
        let report = run(&config).unwrap();

        assert_eq!(report.outcome, LoopOutcome::Finished);
        assert_eq!(report.stats.emitted, 0);
        assert_eq!(report.stats.skipped, 2);
    }
}
