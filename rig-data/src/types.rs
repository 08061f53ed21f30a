//! Core sample types for recorded sensor data.

use crate::lazy_image::LazyImage;
use glam::{Quat, Vec3};

/// Ground-truth rig pose: position plus orientation, always set together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in the dataset frame.
    pub position: Vec3,
    /// Orientation quaternion (x, y, z, w), stored as recorded.
    pub orientation: Quat,
}

impl Pose {
    /// Create a new pose.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// One timestamped unit of recorded data: pose plus up to two camera frames.
///
/// `cam0` is the primary (depth-style) channel and acts as the trigger for
/// replay: samples without it are kept in the index but never emitted.
/// `cam1` is the secondary color channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorSample {
    pub pose: Option<Pose>,
    pub cam0: Option<LazyImage>,
    pub cam1: Option<LazyImage>,
}

impl SensorSample {
    /// Whether the scheduler should emit this sample.
    pub fn is_playable(&self) -> bool {
        self.cam0.is_some()
    }

    pub fn position(&self) -> Option<Vec3> {
        self.pose.map(|pose| pose.position)
    }

    pub fn orientation(&self) -> Option<Quat> {
        self.pose.map(|pose| pose.orientation)
    }

    /// Overwrite every field that `update` specifies, keeping the rest.
    pub fn merge(&mut self, update: SensorSample) {
        if let Some(pose) = update.pose {
            self.pose = Some(pose);
        }
        if let Some(cam0) = update.cam0 {
            self.cam0 = Some(cam0);
        }
        if let Some(cam1) = update.cam1 {
            self.cam1 = Some(cam1);
        }
    }
}
