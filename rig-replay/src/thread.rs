//! Running a [`ReplayPlayer`] on its own thread.

use crate::clock::ReplayClock;
use crate::emitter::SampleEmitter;
use crate::error::ReplayError;
use crate::harness::{LoopOutcome, run_thread_loop};
use crate::player::{ReplayPlayer, ReplayStats};
use rig_data::ImageSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use tracing::error;

/// Final state of a replay thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    pub outcome: LoopOutcome,
    pub stats: ReplayStats,
}

/// Handle to a player running on a dedicated "replay" thread.
pub struct ReplayThread {
    handle: JoinHandle<Result<ReplayReport, ReplayError>>,
    stop: Arc<AtomicBool>,
}

impl ReplayThread {
    /// Move `player` onto a new thread and start playback.
    pub fn spawn<E, C, S>(mut player: ReplayPlayer<E, C, S>) -> Result<Self, ReplayError>
    where
        E: SampleEmitter + Send + 'static,
        C: ReplayClock + Send + 'static,
        S: ImageSource + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("replay".to_string())
            .spawn(move || {
                let outcome = run_thread_loop(&mut player, &flag).inspect_err(|e| {
                    error!("Replay failed: {}", e);
                })?;
                Ok(ReplayReport {
                    outcome,
                    stats: player.stats(),
                })
            })
            .map_err(ReplayError::Spawn)?;

        Ok(Self { handle, stop })
    }

    /// Ask the thread to stop before its next sample.
    ///
    /// A thread waiting for a deadline finishes that wait first.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the thread to end and collect its result.
    pub fn join(self) -> Result<ReplayReport, ReplayError> {
        self.handle
            .join()
            .map_err(|_| ReplayError::ThreadPanicked)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ReplayConfig;
    use crate::emitter::{ChannelEmitter, FnEmitter};
    use crate::frame::ReplayFrame;
    use image::DynamicImage;
    use rig_data::{DatasetIndex, LazyImage, LoadError, SensorSample};
    use std::path::Path;

    fn synthetic(_: &Path) -> Result<DynamicImage, LoadError> {
        Ok(DynamicImage::new_luma8(2, 2))
    }

    fn index(count: u64) -> Arc<DatasetIndex> {
        let samples = (0..count).map(|i| {
            (
                i * 1_000_000,
                SensorSample {
                    cam0: Some(LazyImage::new("depth.png")),
                    ..Default::default()
                },
            )
        });
        Arc::new(DatasetIndex::from_samples(samples).unwrap())
    }

    #[test]
    fn test_thread_replays_to_the_end() {
        let (emitter, frames) = ChannelEmitter::new();
        let player = ReplayPlayer::new(index(5), &ReplayConfig::default(), emitter)
            .unwrap()
            .with_clock(ManualClock::new())
            .with_image_source(synthetic);

        let report = ReplayThread::spawn(player).unwrap().join().unwrap();

        assert_eq!(report.outcome, LoopOutcome::Finished);
        assert_eq!(report.stats.emitted, 5);
        assert_eq!(frames.try_iter().count(), 5);
    }

    #[test]
    fn test_emit_failure_is_returned_from_join() {
        let emitter = FnEmitter::new(|_: ReplayFrame| Err(ReplayError::Emit("closed".to_string())));
        let player = ReplayPlayer::new(index(3), &ReplayConfig::default(), emitter)
            .unwrap()
            .with_clock(ManualClock::new())
            .with_image_source(synthetic);

        let result = ReplayThread::spawn(player).unwrap().join();
        assert!(matches!(result, Err(ReplayError::Emit(_))));
    }

    #[test]
    fn test_stop_cancels_playback() {
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<()>();
        let (resume_tx, resume_rx) = std::sync::mpsc::channel::<()>();
        let emitter = FnEmitter::new(move |_: ReplayFrame| {
            let _ = ready_tx.send(());
            let _ = resume_rx.recv();
            Ok(())
        });
        let player = ReplayPlayer::new(index(10), &ReplayConfig::default(), emitter)
            .unwrap()
            .with_clock(ManualClock::new())
            .with_image_source(synthetic);

        let thread = ReplayThread::spawn(player).unwrap();
        ready_rx.recv().unwrap();
        thread.stop();
        resume_tx.send(()).unwrap();

        let report = thread.join().unwrap();
        assert_eq!(report.outcome, LoopOutcome::Cancelled);
        assert_eq!(report.stats.emitted, 1);
    }
}
