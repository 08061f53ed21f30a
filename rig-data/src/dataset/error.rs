//! Error types for dataset loading.

use crate::timestamp::TimestampError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a dataset.
///
/// All of them are fatal: a dataset with one bad record is not replayed.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset root is not configured")]
    RootNotSet,

    #[error("Dataset root {} is not a directory", .0.display())]
    MissingRoot(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: {source}")]
    Timestamp {
        line: usize,
        #[source]
        source: TimestampError,
    },

    #[error("Line {line}: column {column} is missing")]
    MissingColumn { line: usize, column: usize },

    #[error("Line {line}: column {column} has invalid value {value:?}")]
    Field {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("Line {line}: pose columns are only partially filled")]
    PartialPose { line: usize },

    #[error("Line {line}: duplicate timestamp {timestamp_ns}")]
    DuplicateTimestamp { line: usize, timestamp_ns: u64 },

    #[error("No records found in {}", .0.display())]
    Empty(PathBuf),
}
