//! Rig: recorded sensor dataset loading and real-time replay.
//!
//! - [`data`] loads a dataset's record file into a timestamp-ordered index.
//! - [`replay`] plays that index back at the recorded cadence.

pub use rig_data as data;
pub use rig_replay as replay;
