//! World pose capture and replay for single cubes
//!
//! A [`CubeLocker`] records the world matrix of one of a cube's frames and can
//! later rewrite the cube's local parameters so that frame lands on the
//! recorded matrix again, whatever happened to the parent in between.

use std::collections::BTreeMap;

use glam::DMat4;
use log::trace;

use crate::error::Result;
use crate::math::Decomposed;
use crate::model::{CubeId, Model};

/// Which part of a cube's pose a locker restores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockerType {
    /// Position and rotation of the cube frame
    PositionAndRotation,
    /// Offset of the box mesh inside the cube frame
    Offset,
    /// Position of the cube frame only
    Position,
    /// Rotation of the cube frame only
    Rotation,
}

/// Captured world pose of one cube frame
#[derive(Debug, Clone, PartialEq)]
pub struct CubeLocker {
    cube: CubeId,
    kind: LockerType,
    world_matrix: DMat4,
}

impl CubeLocker {
    /// Capture the current world matrix of the frame selected by `kind`
    ///
    /// `Offset` captures the box mesh frame, every other type captures the
    /// position-bearing cube frame.
    pub fn new(model: &Model, cube: CubeId, kind: LockerType) -> Result<Self> {
        let world_matrix = match kind {
            LockerType::Offset => model.mesh_world_matrix(cube)?,
            _ => model.world_matrix(cube)?,
        };
        Ok(Self {
            cube,
            kind,
            world_matrix,
        })
    }

    pub fn cube(&self) -> CubeId {
        self.cube
    }

    pub fn kind(&self) -> LockerType {
        self.kind
    }

    /// The captured world matrix
    pub fn world_matrix(&self) -> DMat4 {
        self.world_matrix
    }

    /// Rewrite the cube's local parameters so the captured pose is restored
    ///
    /// The frame's current parent is the cube's parent frame (or the model
    /// root frame) for position and rotation lockers, and the cube frame
    /// itself for offset lockers. Setters refresh the cube's subtree, so
    /// dependent cubes see the restored pose immediately.
    pub fn reconstruct(&self, model: &mut Model) -> Result<()> {
        let parent_world = match self.kind {
            LockerType::Offset => model.world_matrix(self.cube)?,
            _ => model.parent_world_matrix(self.cube)?,
        };
        let local = parent_world.inverse() * self.world_matrix;
        let decomposed = Decomposed::from_matrix(&local);

        trace!(
            "Reconstructing {:?} of cube {}",
            self.kind,
            model.describe(self.cube)
        );

        match self.kind {
            LockerType::PositionAndRotation => {
                model.set_position(self.cube, decomposed.translation)?;
                model.set_rotation(self.cube, decomposed.euler_degrees())?;
            }
            LockerType::Position => model.set_position(self.cube, decomposed.translation)?,
            LockerType::Rotation => model.set_rotation(self.cube, decomposed.euler_degrees())?,
            LockerType::Offset => model.set_offset(self.cube, decomposed.translation)?,
        }
        Ok(())
    }
}

/// Lockers grouped by the hierarchy level of their cube
///
/// Replay always goes through levels in ascending order: a locker reads its
/// parent's world matrix, which must already be final.
#[derive(Debug, Clone, Default)]
pub struct LockerCache {
    levels: BTreeMap<usize, Vec<CubeLocker>>,
}

impl LockerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a new locker for `cube` at its hierarchy level
    pub fn add(&mut self, model: &Model, cube: CubeId, kind: LockerType) -> Result<()> {
        let level = model.get(cube)?.hierarchy_level();
        let locker = CubeLocker::new(model, cube, kind)?;
        self.insert(level, locker);
        Ok(())
    }

    pub fn insert(&mut self, level: usize, locker: CubeLocker) {
        self.levels.entry(level).or_default().push(locker);
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }

    /// Total number of lockers
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    /// Occupied hierarchy levels, ascending
    pub fn levels(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels.keys().copied()
    }

    pub fn at_level(&self, level: usize) -> &[CubeLocker] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every locker in ascending level order
    pub fn iter(&self) -> impl Iterator<Item = &CubeLocker> {
        self.levels.values().flatten()
    }

    /// Replay every locker, level by level
    ///
    /// Lockers whose cube has since been removed are skipped.
    pub fn reconstruct_all(&self, model: &mut Model) -> Result<()> {
        for locker in self.iter() {
            if model.contains(locker.cube) {
                locker.reconstruct(model)?;
            }
        }
        Ok(())
    }
}
