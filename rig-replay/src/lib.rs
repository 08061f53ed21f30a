//! Rig Replay - real-time playback of recorded sensor datasets
//!
//! Walks a [`DatasetIndex`](rig_data::DatasetIndex) in timestamp order and
//! releases each playable sample at the wall-clock instant implied by its
//! recorded timestamp:
//!
//! ```text
//! deadline(i) = anchor + (t_i - t_0) / speed
//! ```
//!
//! The anchor is captured once when the replay thread starts, so slow
//! downstream processing never accumulates into drift.
//!
//! ## Example
//!
//! ```ignore
//! use rig_data::{DatasetConfig, load_dataset};
//! use rig_replay::{ChannelEmitter, ReplayConfig, ReplayPlayer, ReplayThread};
//! use std::sync::Arc;
//!
//! let index = Arc::new(load_dataset(&DatasetConfig::new("/data/vcu"))?);
//! let (emitter, frames) = ChannelEmitter::new();
//! let player = ReplayPlayer::new(index, &ReplayConfig::default(), emitter)?;
//! let replay = ReplayThread::spawn(player)?;
//! for frame in frames {
//!     // Process frame...
//! }
//! let report = replay.join()?;
//! ```

mod clock;
mod config;
mod emitter;
mod error;
mod frame;
mod harness;
mod player;
mod scheduler;
mod thread;

pub use clock::{ManualClock, ReplayClock, SystemClock};
pub use config::ReplayConfig;
pub use emitter::{ChannelEmitter, FnEmitter, SampleEmitter};
pub use error::ReplayError;
pub use frame::ReplayFrame;
pub use harness::{LoopOutcome, SkipOption, ThreadLoop, run_thread_loop};
pub use player::{IterationRecord, ReplayPlayer, ReplayStats};
pub use scheduler::{Decision, ReplayScheduler};
pub use thread::{ReplayReport, ReplayThread};
