//! Rig Data Crate
//!
//! Loading of recorded multi-sensor datasets for offline replay.
//! This crate is transport-agnostic and focuses on parsing the record file
//! into an ordered, immutable index of sensor samples.
//!
//! ## Modules
//!
//! - [`timestamp`]: decimal timestamp text to integer nanoseconds
//! - [`lazy_image`]: deferred image handles resolved on demand
//! - [`types`]: pose and sensor sample types
//! - [`dataset`]: record file loader and the dataset index

pub mod dataset;
pub mod lazy_image;
pub mod timestamp;
pub mod types;

pub use dataset::{
    ColumnLayout, DatasetConfig, DatasetError, DatasetIndex, DuplicatePolicy, load_dataset,
};
pub use lazy_image::{FsImageSource, ImageSource, LazyImage, LoadError};
pub use timestamp::{TimestampError, parse_timestamp_ns};
pub use types::{Pose, SensorSample};
