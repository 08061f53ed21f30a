//! Record file loading and the dataset index

mod config;
mod error;
mod index;
mod loader;

pub use config::{ColumnLayout, DEFAULT_RECORD_FILE, DatasetConfig, DuplicatePolicy};
pub use error::DatasetError;
pub use index::DatasetIndex;
pub use loader::{load_dataset, read_records};
