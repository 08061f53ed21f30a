//! Ordered, immutable index of sensor samples.

use crate::types::SensorSample;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::time::Duration;

/// All samples of a recording, keyed by nanosecond timestamp.
///
/// An index is never empty and never changes after it is built; replay
/// walks it with its own cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetIndex {
    samples: BTreeMap<u64, SensorSample>,
    first: u64,
    last: u64,
}

impl DatasetIndex {
    /// Build an index from already-merged samples. Returns `None` if empty.
    pub fn from_samples(samples: impl IntoIterator<Item = (u64, SensorSample)>) -> Option<Self> {
        Self::from_map(samples.into_iter().collect())
    }

    pub(crate) fn from_map(samples: BTreeMap<u64, SensorSample>) -> Option<Self> {
        let first = *samples.keys().next()?;
        let last = *samples.keys().next_back()?;
        Some(Self {
            samples,
            first,
            last,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the earliest sample.
    pub fn first_timestamp(&self) -> u64 {
        self.first
    }

    /// Timestamp of the latest sample.
    pub fn last_timestamp(&self) -> u64 {
        self.last
    }

    /// Recorded span between the first and the last sample.
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.last - self.first)
    }

    pub fn get(&self, timestamp_ns: u64) -> Option<&SensorSample> {
        self.samples.get(&timestamp_ns)
    }

    /// Samples in ascending timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &SensorSample)> {
        self.samples.iter().map(|(&t, sample)| (t, sample))
    }

    /// First sample whose timestamp lies after `cursor`.
    pub fn next_from(&self, cursor: Bound<u64>) -> Option<(u64, &SensorSample)> {
        self.samples
            .range((cursor, Bound::Unbounded))
            .next()
            .map(|(&t, sample)| (t, sample))
    }

    /// Number of samples that carry a primary camera frame.
    pub fn playable_count(&self) -> usize {
        self.samples.values().filter(|s| s.is_playable()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy_image::LazyImage;

    fn playable() -> SensorSample {
        SensorSample {
            cam0: Some(LazyImage::new("depth.png")),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_index_is_not_built() {
        assert!(DatasetIndex::from_samples(Vec::<(u64, SensorSample)>::new()).is_none());
    }

    #[test]
    fn test_iterates_in_ascending_order() {
        let index = DatasetIndex::from_samples([
            (30, playable()),
            (10, SensorSample::default()),
            (20, playable()),
        ])
        .unwrap();

        let order: Vec<u64> = index.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec![10, 20, 30]);
        assert_eq!(index.first_timestamp(), 10);
        assert_eq!(index.last_timestamp(), 30);
        assert_eq!(index.duration(), Duration::from_nanos(20));
        assert_eq!(index.playable_count(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_next_from_cursor() {
        let index = DatasetIndex::from_samples([(5, playable()), (7, playable())]).unwrap();

        assert_eq!(index.next_from(Bound::Unbounded).map(|(t, _)| t), Some(5));
        assert_eq!(index.next_from(Bound::Excluded(5)).map(|(t, _)| t), Some(7));
        assert_eq!(index.next_from(Bound::Excluded(7)).map(|(t, _)| t), None);
    }
}
