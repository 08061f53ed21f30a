//! Dataset playback as a [`ThreadLoop`].

use crate::clock::{ReplayClock, SystemClock};
use crate::config::ReplayConfig;
use crate::emitter::SampleEmitter;
use crate::error::ReplayError;
use crate::frame::ReplayFrame;
use crate::harness::{LoopOutcome, SkipOption, ThreadLoop, run_thread_loop};
use crate::scheduler::{Decision, ReplayScheduler};
use rig_data::{DatasetIndex, FsImageSource, ImageSource};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Running totals for a replay session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Samples handed to the emitter.
    pub emitted: u64,
    /// Samples passed over because they had no primary frame.
    pub skipped: u64,
    /// Emissions that started later than the warning threshold.
    pub late: u64,
}

/// What happened in one emitted iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationRecord {
    pub iteration: u64,
    pub timestamp_ns: u64,
    pub has_depth: bool,
    pub has_color: bool,
    /// How far past its deadline the sample was when it came up.
    pub lateness: Duration,
}

/// Replays a dataset index through an emitter at the recorded cadence.
///
/// The wall-clock anchor is captured in [`ThreadLoop::thread_setup`], i.e.
/// when playback starts rather than when the player is built.
pub struct ReplayPlayer<E, C = SystemClock, S = FsImageSource> {
    scheduler: ReplayScheduler,
    emitter: E,
    clock: C,
    images: S,
    real_first_time: Option<Instant>,
    late_warning: Duration,
    lateness: Duration,
    pending_error: Option<ReplayError>,
    iteration: u64,
    stats: ReplayStats,
}

impl<E: SampleEmitter> ReplayPlayer<E> {
    /// Create a player on the system clock that decodes images from disk.
    pub fn new(
        index: Arc<DatasetIndex>,
        config: &ReplayConfig,
        emitter: E,
    ) -> Result<Self, ReplayError> {
        Ok(Self {
            scheduler: ReplayScheduler::new(index, config)?,
            emitter,
            clock: SystemClock,
            images: FsImageSource,
            real_first_time: None,
            late_warning: config.late_warning(),
            lateness: Duration::ZERO,
            pending_error: None,
            iteration: 0,
            stats: ReplayStats::default(),
        })
    }
}

impl<E, C, S> ReplayPlayer<E, C, S> {
    /// Replace the clock used for pacing.
    pub fn with_clock<C2: ReplayClock>(self, clock: C2) -> ReplayPlayer<E, C2, S> {
        ReplayPlayer {
            scheduler: self.scheduler,
            emitter: self.emitter,
            clock,
            images: self.images,
            real_first_time: self.real_first_time,
            late_warning: self.late_warning,
            lateness: self.lateness,
            pending_error: self.pending_error,
            iteration: self.iteration,
            stats: self.stats,
        }
    }

    /// Replace the image decoder.
    pub fn with_image_source<S2: ImageSource>(self, images: S2) -> ReplayPlayer<E, C, S2> {
        ReplayPlayer {
            scheduler: self.scheduler,
            emitter: self.emitter,
            clock: self.clock,
            images,
            real_first_time: self.real_first_time,
            late_warning: self.late_warning,
            lateness: self.lateness,
            pending_error: self.pending_error,
            iteration: self.iteration,
            stats: self.stats,
        }
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    pub fn scheduler(&self) -> &ReplayScheduler {
        &self.scheduler
    }

    /// Wall-clock anchor, once playback has started.
    pub fn real_first_time(&self) -> Option<Instant> {
        self.real_first_time
    }
}

impl<E, C, S> ReplayPlayer<E, C, S>
where
    E: SampleEmitter,
    C: ReplayClock,
    S: ImageSource,
{
    /// Play the whole dataset on the calling thread.
    pub fn run(&mut self) -> Result<LoopOutcome, ReplayError> {
        run_thread_loop(self, &AtomicBool::new(false))
    }

    /// The wall-clock anchor. Normally set by `thread_setup`; when the loop is
    /// driven without it, the first `Run` decision takes the current time.
    fn anchor(&mut self) -> Instant {
        *self
            .real_first_time
            .get_or_insert_with(|| self.clock.now())
    }

    fn log_iteration(&mut self, record: &IterationRecord) {
        debug!(
            iteration = record.iteration,
            timestamp_ns = record.timestamp_ns,
            has_depth = record.has_depth,
            has_color = record.has_color,
            lateness_us = record.lateness.as_micros() as u64,
            "Replayed sample"
        );

        if record.lateness > self.late_warning {
            self.stats.late += 1;
            warn!(
                "Sample {} came up {:.1}ms past its deadline",
                record.timestamp_ns,
                record.lateness.as_secs_f64() * 1e3
            );
        }
    }
}

impl<E, C, S> ThreadLoop for ReplayPlayer<E, C, S>
where
    E: SampleEmitter,
    C: ReplayClock,
    S: ImageSource,
{
    type Error = ReplayError;

    fn thread_setup(&mut self) {
        self.real_first_time = Some(self.clock.now());

        let index = self.scheduler.index();
        info!(
            "Replay started: {} samples ({} playable) over {:.3}s",
            index.len(),
            index.playable_count(),
            index.duration().as_secs_f64()
        );
    }

    fn should_skip(&mut self) -> SkipOption {
        match self.scheduler.decide() {
            Decision::Run { timestamp_ns } => {
                let anchor = self.anchor();
                match self.scheduler.deadline(anchor, timestamp_ns) {
                    Some(deadline) => {
                        self.lateness = self.clock.now().saturating_duration_since(deadline);
                        self.clock.sleep_until(deadline);
                    }
                    // Reported by the iteration that would have emitted it.
                    None => {
                        self.pending_error = Some(ReplayError::DeadlineOutOfRange { timestamp_ns });
                    }
                }
                SkipOption::Run
            }
            Decision::Skip { timestamp_ns } => {
                trace!(timestamp_ns, "Skipping sample without primary frame");
                self.scheduler.advance();
                self.stats.skipped += 1;
                SkipOption::SkipAndYield
            }
            Decision::Stop => {
                info!(
                    "Replay stopped: end of dataset ({} emitted, {} skipped)",
                    self.stats.emitted, self.stats.skipped
                );
                SkipOption::Stop
            }
        }
    }

    fn one_iteration(&mut self) -> Result<(), ReplayError> {
        if let Some(error) = self.pending_error.take() {
            return Err(error);
        }
        let (timestamp_ns, sample) = self.scheduler.current().ok_or(ReplayError::Exhausted)?;
        let frame = ReplayFrame::resolve(timestamp_ns, sample, &self.images)?;
        self.scheduler.advance();

        let record = IterationRecord {
            iteration: self.iteration,
            timestamp_ns,
            has_depth: frame.has_depth(),
            has_color: frame.has_color(),
            lateness: self.lateness,
        };
        self.log_iteration(&record);

        self.emitter.emit(frame)?;
        self.iteration += 1;
        self.stats.emitted += 1;
        Ok(())
    }
}
