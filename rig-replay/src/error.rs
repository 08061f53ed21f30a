//! Error types for replay.

use rig_data::LoadError;
use thiserror::Error;

/// Errors that can occur during replay.
///
/// None of these are retried: a replay that fails stops immediately rather
/// than emitting partially-correct data.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to load sample image: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to emit sample: {0}")]
    Emit(String),

    #[error("Playback speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("Deadline for sample {timestamp_ns} is out of range at this playback speed")]
    DeadlineOutOfRange { timestamp_ns: u64 },

    #[error("Iteration requested after the dataset was exhausted")]
    Exhausted,

    #[error("Failed to spawn replay thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Replay thread panicked")]
    ThreadPanicked,
}
