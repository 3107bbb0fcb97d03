//! Keyframe pose animation
//!
//! This module provides the pose side of the animator:
//! - Pose snapshots (local position and rotation per cube identifier)
//! - Keyframe interpolation (linear, step)
//! - Pose tracks sampled at arbitrary times
//!
//! # Example
//!
//! ```rust,ignore
//! use cuboid_rig::animation::{PoseSnapshot, PoseTrack};
//!
//! let mut track = PoseTrack::new();
//! track.insert(0.0, PoseSnapshot::capture(&model));
//! // ... edit the model ...
//! track.insert(1000.0, PoseSnapshot::capture(&model));
//!
//! if let Some(pose) = track.sample(250.0) {
//!     locked.apply_pose_preserving_locks(&mut model, &pose)?;
//! }
//! ```

mod interpolation;
mod pose;
mod types;

pub use interpolation::{Interpolation, find_timestamp_index, interpolate_keyframes};
pub use pose::{CubePose, PoseKeyframe, PoseSnapshot, PoseTrack};
pub use types::Lerp;
