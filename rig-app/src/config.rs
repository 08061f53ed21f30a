//! Application configuration: an optional JSON file overlaid by CLI flags.

use crate::error::AppError;
use rig_data::DatasetConfig;
use rig_replay::ReplayConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything the binary needs to run a replay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub replay: ReplayConfig,
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            replay: ReplayConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line. `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dataset: Option<PathBuf>,
    pub record_file: Option<String>,
    pub speed: Option<f64>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Read a config file, or start from defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line values on top of this configuration.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(root) = overrides.dataset {
            self.dataset.root = root;
        }
        if let Some(record_file) = overrides.record_file {
            self.dataset.record_file = record_file;
        }
        if let Some(speed) = overrides.speed {
            self.replay.speed = speed;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }

    /// Reject configurations that cannot start a replay.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.dataset.root.as_os_str().is_empty() {
            return Err(AppError::Config(
                "no dataset root given; pass --dataset or set RIG_DATA".to_string(),
            ));
        }
        self.replay.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_file_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rig.json");
        std::fs::write(
            &path,
            r#"{ "dataset": { "root": "/data/a", "record_file": "poses.csv" },
                 "replay": { "speed": 2.0 } }"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap().apply(Overrides {
            dataset: Some(PathBuf::from("/data/b")),
            log_level: Some("debug".to_string()),
            ..Default::default()
        });

        assert_eq!(config.dataset.root, PathBuf::from("/data/b"));
        assert_eq!(config.dataset.record_file, "poses.csv");
        assert_eq!(config.replay.speed, 2.0);
        assert_eq!(config.replay.late_warning_ms, 50);
        assert_eq!(config.log_level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_root_is_a_config_error() {
        let config = AppConfig::default();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_bad_speed_is_rejected() {
        let config = AppConfig::default().apply(Overrides {
            dataset: Some(PathBuf::from("/data")),
            speed: Some(-1.0),
            ..Default::default()
        });
        assert!(matches!(config.validate(), Err(AppError::Replay(_))));
    }

    #[test]
    fn test_unreadable_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(AppError::ConfigRead { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::load(Some(&bad)),
            Err(AppError::ConfigParse { .. })
        ));
    }
}
