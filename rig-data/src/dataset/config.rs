//! Loader configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Record file name used when none is configured.
pub const DEFAULT_RECORD_FILE: &str = "file.csv";

/// Which record column holds which field (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub timestamp: usize,
    /// x, y, z
    pub position: [usize; 3],
    /// x, y, z, w
    pub orientation: [usize; 4],
    pub cam0: usize,
    pub cam1: usize,
}

impl ColumnLayout {
    /// The seven pose columns, position first.
    pub(crate) fn pose_columns(&self) -> [usize; 7] {
        let [px, py, pz] = self.position;
        let [qx, qy, qz, qw] = self.orientation;
        [px, py, pz, qx, qy, qz, qw]
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            timestamp: 0,
            position: [1, 2, 3],
            orientation: [4, 5, 6, 7],
            cam0: 9,
            cam1: 11,
        }
    }
}

/// What to do when two records normalize to the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later record overwrites every field it specifies.
    #[default]
    Merge,
    /// A collision fails the load.
    Reject,
}

/// Where the dataset lives and how its record file is laid out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset root; image paths in the record file are relative to it.
    pub root: PathBuf,
    /// Record file name, relative to `root`.
    pub record_file: String,
    pub delimiter: char,
    pub columns: ColumnLayout,
    pub duplicates: DuplicatePolicy,
}

impl DatasetConfig {
    /// Create a configuration for the dataset at `root` with default layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_record_file(mut self, record_file: impl Into<String>) -> Self {
        self.record_file = record_file.into();
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the record file.
    pub fn record_path(&self) -> PathBuf {
        self.root.join(&self.record_file)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            record_file: DEFAULT_RECORD_FILE.to_string(),
            delimiter: ',',
            columns: ColumnLayout::default(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.pose_columns(), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!((layout.cam0, layout.cam1), (9, 11));
    }

    #[test]
    fn test_record_path() {
        let config = DatasetConfig::new("/data/vcu");
        assert_eq!(config.record_path(), PathBuf::from("/data/vcu/file.csv"));

        let config = config.with_record_file("poses.txt");
        assert_eq!(config.record_path(), PathBuf::from("/data/vcu/poses.txt"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DatasetConfig = serde_json::from_str(
            r#"{ "root": "/data/tum", "delimiter": " ", "duplicates": "reject",
                 "columns": { "cam0": 8 } }"#,
        )
        .unwrap();

        assert_eq!(config.root, PathBuf::from("/data/tum"));
        assert_eq!(config.record_file, DEFAULT_RECORD_FILE);
        assert_eq!(config.delimiter, ' ');
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.columns.cam0, 8);
        assert_eq!(config.columns.cam1, 11);
    }
}
