//! Pose snapshots and keyframe tracks

use std::collections::BTreeMap;

use glam::DVec3;

use super::interpolation::{Interpolation, find_timestamp_index, interpolate_keyframes};
use super::types::Lerp;
use crate::error::Result;
use crate::model::Model;

/// Local position and rotation of one cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubePose {
    pub position: DVec3,
    /// Euler ZYX degrees
    pub rotation: DVec3,
}

impl Lerp for CubePose {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
        }
    }
}

/// Poses of a set of cubes, keyed by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseSnapshot {
    poses: BTreeMap<String, CubePose>,
}

impl PoseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every cube of the model
    pub fn capture(model: &Model) -> Self {
        let mut snapshot = Self::new();
        for id in model.iter_by_level() {
            if let Some(cube) = model.cube(id) {
                snapshot.insert(
                    cube.identifier(),
                    CubePose {
                        position: cube.position(),
                        rotation: cube.rotation(),
                    },
                );
            }
        }
        snapshot
    }

    pub fn insert(&mut self, identifier: impl Into<String>, pose: CubePose) {
        self.poses.insert(identifier.into(), pose);
    }

    pub fn get(&self, identifier: &str) -> Option<&CubePose> {
        self.poses.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CubePose)> {
        self.poses.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Write the poses back, parents before children
    ///
    /// Identifiers missing from the model are ignored.
    pub fn apply(&self, model: &mut Model) -> Result<()> {
        for id in model.iter_by_level() {
            let Some(pose) = model
                .cube(id)
                .and_then(|cube| self.poses.get(cube.identifier()))
                .copied()
            else {
                continue;
            };
            model.set_position(id, pose.position)?;
            model.set_rotation(id, pose.rotation)?;
        }
        Ok(())
    }
}

impl Lerp for PoseSnapshot {
    /// Cubes present in only one snapshot keep that snapshot's pose
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut poses = self.poses.clone();
        for (identifier, target) in &other.poses {
            let pose = match self.poses.get(identifier) {
                Some(start) => start.lerp(target, t),
                None => *target,
            };
            poses.insert(identifier.clone(), pose);
        }
        Self { poses }
    }
}

/// One keyframe of a pose track
#[derive(Debug, Clone, PartialEq)]
pub struct PoseKeyframe {
    pub time: f64,
    pub pose: PoseSnapshot,
}

/// Keyframes sorted by time
#[derive(Debug, Clone, Default)]
pub struct PoseTrack {
    keyframes: Vec<PoseKeyframe>,
    interpolation: Interpolation,
}

impl PoseTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Insert a keyframe, replacing one at exactly the same time
    pub fn insert(&mut self, time: f64, pose: PoseSnapshot) {
        match self.keyframes.iter().position(|k| k.time >= time) {
            Some(index) if self.keyframes[index].time == time => {
                self.keyframes[index].pose = pose;
            }
            Some(index) => self.keyframes.insert(index, PoseKeyframe { time, pose }),
            None => self.keyframes.push(PoseKeyframe { time, pose }),
        }
    }

    pub fn keyframes(&self) -> &[PoseKeyframe] {
        &self.keyframes
    }

    /// Time of the last keyframe
    pub fn duration(&self) -> f64 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    /// Index of the keyframe at or before `time`
    pub fn keyframe_index(&self, time: f64) -> Option<usize> {
        let timestamps: Vec<f64> = self.keyframes.iter().map(|k| k.time).collect();
        find_timestamp_index(&timestamps, time)
    }

    /// Interpolated pose at `time`, or None for an empty track
    pub fn sample(&self, time: f64) -> Option<PoseSnapshot> {
        let timestamps: Vec<f64> = self.keyframes.iter().map(|k| k.time).collect();
        let poses: Vec<PoseSnapshot> = self.keyframes.iter().map(|k| k.pose.clone()).collect();
        interpolate_keyframes(&timestamps, &poses, time, self.interpolation)
    }
}
