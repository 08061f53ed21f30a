//! Record file loading functions

use crate::dataset::{ColumnLayout, DatasetConfig, DatasetError, DatasetIndex, DuplicatePolicy};
use crate::lazy_image::LazyImage;
use crate::timestamp::parse_timestamp_ns;
use crate::types::{Pose, SensorSample};
use glam::{Quat, Vec3};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{debug, info, warn};

/// Load the dataset described by `config` into an index.
///
/// Only the record file is read; image files are referenced by path and
/// decoded later, when a sample is replayed.
#[tracing::instrument(skip_all, fields(root = %config.root.display()))]
pub fn load_dataset(config: &DatasetConfig) -> Result<DatasetIndex, DatasetError> {
    if config.root.as_os_str().is_empty() {
        return Err(DatasetError::RootNotSet);
    }
    if !config.root.is_dir() {
        return Err(DatasetError::MissingRoot(config.root.clone()));
    }

    let path = config.record_path();
    info!("Loading sensor records from {}", path.display());

    let file = File::open(&path).map_err(|source| DatasetError::Io {
        path: path.clone(),
        source,
    })?;

    let index = read_records(BufReader::new(file), config)?.ok_or(DatasetError::Empty(path))?;

    info!(
        "Finished loading dataset: {} samples ({} playable) spanning {:.3}s",
        index.len(),
        index.playable_count(),
        index.duration().as_secs_f64()
    );
    Ok(index)
}

/// Parse every record from `reader`. Returns `None` if there were no records.
///
/// Every non-blank line is a record; there is no header row. Image paths are
/// resolved against `config.root`.
pub fn read_records<R: BufRead>(
    reader: R,
    config: &DatasetConfig,
) -> Result<Option<DatasetIndex>, DatasetError> {
    let mut samples: BTreeMap<u64, SensorSample> = BTreeMap::new();
    let mut merged = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|source| DatasetError::Io {
            path: config.record_path(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let (timestamp_ns, sample) = parse_record(line_no, &line, config)?;

        match samples.entry(timestamp_ns) {
            Entry::Vacant(entry) => {
                entry.insert(sample);
            }
            Entry::Occupied(mut entry) => match config.duplicates {
                DuplicatePolicy::Merge => {
                    merged += 1;
                    entry.get_mut().merge(sample);
                }
                DuplicatePolicy::Reject => {
                    return Err(DatasetError::DuplicateTimestamp {
                        line: line_no,
                        timestamp_ns,
                    });
                }
            },
        }
    }

    if merged > 0 {
        warn!(
            "{} records shared a timestamp with an earlier record and were merged into it",
            merged
        );
    }
    debug!("Parsed {} samples", samples.len());

    Ok(DatasetIndex::from_map(samples))
}

fn parse_record(
    line_no: usize,
    line: &str,
    config: &DatasetConfig,
) -> Result<(u64, SensorSample), DatasetError> {
    let fields: Vec<&str> = line.split(config.delimiter).map(str::trim).collect();
    let columns = &config.columns;

    let timestamp = fields
        .get(columns.timestamp)
        .ok_or(DatasetError::MissingColumn {
            line: line_no,
            column: columns.timestamp,
        })?;
    let timestamp_ns = parse_timestamp_ns(timestamp).map_err(|source| DatasetError::Timestamp {
        line: line_no,
        source,
    })?;

    // Image paths always stay under the dataset root, even with a leading separator.
    let image = |column: usize| {
        fields
            .get(column)
            .map(|path| path.trim_start_matches(['/', '\\']))
            .filter(|path| !path.is_empty())
            .map(|path| LazyImage::new(config.root.join(path)))
    };

    let sample = SensorSample {
        pose: parse_pose(line_no, &fields, columns)?,
        cam0: image(columns.cam0),
        cam1: image(columns.cam1),
    };
    Ok((timestamp_ns, sample))
}

/// Position and orientation come from the same record or not at all.
fn parse_pose(
    line_no: usize,
    fields: &[&str],
    columns: &ColumnLayout,
) -> Result<Option<Pose>, DatasetError> {
    let raw = columns
        .pose_columns()
        .map(|column| (column, fields.get(column).copied().unwrap_or("")));

    if raw.iter().all(|(_, value)| value.is_empty()) {
        return Ok(None);
    }
    if raw.iter().any(|(_, value)| value.is_empty()) {
        return Err(DatasetError::PartialPose { line: line_no });
    }

    let mut values = [0.0f32; 7];
    for (slot, (column, value)) in values.iter_mut().zip(raw) {
        *slot = value.parse().map_err(|_| DatasetError::Field {
            line: line_no,
            column,
            value: value.to_string(),
        })?;
    }

    let [px, py, pz, qx, qy, qz, qw] = values;
    Ok(Some(Pose::new(
        Vec3::new(px, py, pz),
        Quat::from_xyzw(qx, qy, qz, qw),
    )))
}
