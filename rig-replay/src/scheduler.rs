//! Replay scheduling: which sample is next and when it is due.
//!
//! Everything here is a pure function of the index, the cursor and the two
//! time anchors. Sleeping and emitting are left to the caller.

use crate::config::ReplayConfig;
use crate::error::ReplayError;
use rig_data::{DatasetIndex, SensorSample};
use std::ops::Bound;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of a scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The sample at the cursor has a primary frame and should be emitted
    /// once its deadline is reached.
    Run { timestamp_ns: u64 },
    /// The sample at the cursor has no primary frame; advance without waiting.
    Skip { timestamp_ns: u64 },
    /// The cursor is past the last sample.
    Stop,
}

/// Forward-only cursor over a shared, read-only dataset index.
#[derive(Debug, Clone)]
pub struct ReplayScheduler {
    index: Arc<DatasetIndex>,
    cursor: Bound<u64>,
    dataset_first_time: u64,
    speed: f64,
}

impl ReplayScheduler {
    pub fn new(index: Arc<DatasetIndex>, config: &ReplayConfig) -> Result<Self, ReplayError> {
        config.validate()?;
        let dataset_first_time = index.first_timestamp();
        let scheduler = Self {
            index,
            cursor: Bound::Unbounded,
            dataset_first_time,
            speed: config.speed,
        };

        // The last offset is the largest; every earlier one fits if it does.
        if scheduler.offset(scheduler.index.last_timestamp()).is_none() {
            return Err(ReplayError::InvalidSpeed(config.speed));
        }
        Ok(scheduler)
    }

    pub fn index(&self) -> &DatasetIndex {
        &self.index
    }

    /// Timestamp of the first sample in the dataset.
    pub fn dataset_first_time(&self) -> u64 {
        self.dataset_first_time
    }

    /// Sample under the cursor, if any remain.
    pub fn current(&self) -> Option<(u64, &SensorSample)> {
        self.index.next_from(self.cursor)
    }

    /// Classify the sample under the cursor.
    pub fn decide(&self) -> Decision {
        match self.current() {
            Some((timestamp_ns, sample)) if sample.is_playable() => Decision::Run { timestamp_ns },
            Some((timestamp_ns, _)) => Decision::Skip { timestamp_ns },
            None => Decision::Stop,
        }
    }

    /// Move the cursor past the current sample.
    pub fn advance(&mut self) {
        if let Some(timestamp_ns) = self.current().map(|(t, _)| t) {
            self.cursor = Bound::Excluded(timestamp_ns);
        }
    }

    /// Wall-clock offset of `timestamp_ns` from the replay anchor, or `None`
    /// if the scaled offset does not fit in a `Duration`.
    pub fn offset(&self, timestamp_ns: u64) -> Option<Duration> {
        let recorded = timestamp_ns.saturating_sub(self.dataset_first_time);
        if self.speed == 1.0 {
            Some(Duration::from_nanos(recorded))
        } else {
            Duration::try_from_secs_f64(recorded as f64 / 1e9 / self.speed).ok()
        }
    }

    /// Instant at which the sample recorded at `timestamp_ns` is due.
    ///
    /// Always computed from the fixed `anchor`, never from the previous
    /// emission. `None` if the deadline is not representable.
    pub fn deadline(&self, anchor: Instant, timestamp_ns: u64) -> Option<Instant> {
        anchor.checked_add(self.offset(timestamp_ns)?)
    }
}
