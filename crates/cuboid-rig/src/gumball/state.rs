//! Gesture start and end

use std::collections::BTreeSet;

use glam::{DQuat, DVec3};
use log::debug;

use super::{Gumball, GumballMode, TranslateTarget};
use crate::error::{Result, RigError};
use crate::locked::LockedCubes;
use crate::locker::{CubeLocker, LockerCache, LockerType};
use crate::math::{Decomposed, quat_from_euler_degrees};
use crate::model::{CubeId, CubeLocalState, Model};
use crate::selection::Selection;

/// Values of a selected cube at `mouse_down`
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCube {
    pub id: CubeId,
    /// No ancestor of this cube is selected
    pub root: bool,
    pub position: DVec3,
    pub offset: DVec3,
    pub dimension: DVec3,
    /// Local rotation
    pub rotation: DQuat,
    pub world_position: DVec3,
    pub world_rotation: DQuat,
}

#[derive(Debug)]
pub(super) struct GestureState {
    pub(super) cubes: Vec<CachedCube>,
    /// World rotation of the first selected root, used for local space
    pub(super) anchor_rotation: DQuat,
    /// Local state of every cube the gesture may write, parents first
    pub(super) initial: Vec<(CubeId, CubeLocalState)>,
    pub(super) rotation_point_lockers: LockerCache,
}

impl Gumball {
    /// Start a gesture on the current selection
    ///
    /// Builds the lock caches of `locked` for the whole gesture. In rotation
    /// point mode the box and the children of each selected cube are
    /// captured as well, so moving the pivot leaves them in place.
    pub fn mouse_down(
        &mut self,
        model: &Model,
        selection: &Selection,
        locked: &mut LockedCubes,
    ) -> Result<()> {
        if self.gesture.is_some() {
            return Err(RigError::GestureInProgress);
        }

        let mut cubes = Vec::with_capacity(selection.len());
        for id in selection.by_level(model) {
            let cube = model.get(id)?;
            let world = Decomposed::from_matrix(&cube.world_matrix());
            cubes.push(CachedCube {
                id,
                root: selection.is_root(model, id),
                position: cube.position(),
                offset: cube.offset(),
                dimension: cube.dimension(),
                rotation: quat_from_euler_degrees(cube.rotation()),
                world_position: world.translation,
                world_rotation: world.rotation,
            });
        }
        let anchor_rotation = cubes
            .iter()
            .find(|c| c.root)
            .map_or(DQuat::IDENTITY, |c| c.world_rotation);

        locked.create_locked_cubes_cache(model, selection, false)?;

        let mut rotation_point_lockers = LockerCache::new();
        if self.config.mode == GumballMode::Translate
            && self.config.translate_target == TranslateTarget::RotationPoint
        {
            // children the gesture moves itself keep their own pivot move
            let moved: BTreeSet<CubeId> = cubes
                .iter()
                .filter(|c| c.root || !self.config.move_as_root_only)
                .map(|c| c.id)
                .collect();
            for cached in &cubes {
                rotation_point_lockers.add(model, cached.id, LockerType::Offset)?;
                for &child in model.get(cached.id)?.children() {
                    if !moved.contains(&child) {
                        rotation_point_lockers.add(model, child, LockerType::Position)?;
                    }
                }
            }
        }

        let mut touched: BTreeSet<CubeId> = cubes.iter().map(|c| c.id).collect();
        touched.extend(locked.locked_children_cache().iter().map(CubeLocker::cube));
        touched.extend(locked.moving_children_cache().iter().copied());
        touched.extend(rotation_point_lockers.iter().map(CubeLocker::cube));
        let mut order: Vec<CubeId> = touched.into_iter().collect();
        model.sort_by_level(&mut order);
        let initial = order
            .into_iter()
            .map(|id| Ok((id, model.local_state(id)?)))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Gesture started: {:?} on {} cubes, {} cubes to restore per update",
            self.config.mode,
            cubes.len(),
            initial.len()
        );

        self.gesture = Some(GestureState {
            cubes,
            anchor_rotation,
            initial,
            rotation_point_lockers,
        });
        Ok(())
    }

    /// Finish the gesture, keeping the last update
    pub fn mouse_up(&mut self, locked: &mut LockedCubes) -> Result<()> {
        if self.gesture.take().is_none() {
            return Err(RigError::NoActiveGesture);
        }
        locked.clear_cache();
        debug!("Gesture finished");
        Ok(())
    }

    /// Abort the gesture and put every touched cube back
    pub fn cancel(&mut self, model: &mut Model, locked: &mut LockedCubes) -> Result<()> {
        self.restore_initial(model)?;
        self.gesture = None;
        locked.clear_cache();
        debug!("Gesture cancelled");
        Ok(())
    }
}
