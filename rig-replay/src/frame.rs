//! The payload handed to downstream consumers.

use glam::{Quat, Vec3};
use image::{DynamicImage, RgbaImage};
use rig_data::{ImageSource, LoadError, SensorSample};
use std::time::Duration;

/// A replayed sample with its images decoded.
///
/// Every optional field stays `None` when the recording had no data for it,
/// so consumers can tell a missing frame from a black one.
#[derive(Debug, Clone)]
pub struct ReplayFrame {
    /// Secondary camera, converted to 8-bit RGBA.
    pub color: Option<RgbaImage>,
    /// Primary camera, exactly as stored.
    pub depth: Option<DynamicImage>,
    pub position: Option<Vec3>,
    /// Orientation quaternion (x, y, z, w).
    pub orientation: Option<Quat>,
    /// Recorded timestamp in dataset nanoseconds.
    pub timestamp_ns: u64,
}

impl ReplayFrame {
    /// Decode the images of `sample`.
    ///
    /// Fails without producing a frame if either image cannot be resolved.
    pub fn resolve<S>(timestamp_ns: u64, sample: &SensorSample, images: &S) -> Result<Self, LoadError>
    where
        S: ImageSource + ?Sized,
    {
        let depth = sample
            .cam0
            .as_ref()
            .map(|cam0| cam0.resolve_unmodified(images))
            .transpose()?;
        let color = sample
            .cam1
            .as_ref()
            .map(|cam1| cam1.resolve_modified(images))
            .transpose()?;

        Ok(Self {
            color,
            depth,
            position: sample.position(),
            orientation: sample.orientation(),
            timestamp_ns,
        })
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }

    /// Recorded timestamp as a duration since the dataset epoch.
    pub fn timestamp(&self) -> Duration {
        Duration::from_nanos(self.timestamp_ns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_data::{LazyImage, Pose};
    use std::path::Path;

    fn synthetic(path: &Path) -> Result<DynamicImage, LoadError> {
        if path.starts_with("missing") {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(DynamicImage::new_luma8(1, 1))
    }

    #[test]
    fn test_resolve_full_sample() {
        let sample = SensorSample {
            pose: Some(Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY)),
            cam0: Some(LazyImage::new("depth.png")),
            cam1: Some(LazyImage::new("rgb.png")),
        };

        let frame = ReplayFrame::resolve(42, &sample, &synthetic).unwrap();
        assert!(frame.has_depth());
        assert!(frame.has_color());
        assert!(matches!(frame.depth, Some(DynamicImage::ImageLuma8(_))));
        assert_eq!(frame.color.as_ref().map(|c| c.dimensions()), Some((1, 1)));
        assert_eq!(frame.position, Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(frame.orientation, Some(Quat::IDENTITY));
        assert_eq!(frame.timestamp(), Duration::from_nanos(42));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let sample = SensorSample {
            cam0: Some(LazyImage::new("depth.png")),
            ..Default::default()
        };

        let frame = ReplayFrame::resolve(7, &sample, &synthetic).unwrap();
        assert!(frame.has_depth());
        assert!(frame.color.is_none());
        assert!(frame.position.is_none());
        assert!(frame.orientation.is_none());
    }

    #[test]
    fn test_unresolvable_image_yields_no_frame() {
        let sample = SensorSample {
            cam0: Some(LazyImage::new("depth.png")),
            cam1: Some(LazyImage::new("missing/rgb.png")),
            ..Default::default()
        };

        assert!(ReplayFrame::resolve(7, &sample, &synthetic).is_err());
    }
}
