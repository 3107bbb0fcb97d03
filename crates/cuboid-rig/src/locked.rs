//! Locked cube bookkeeping and world pose restoration
//!
//! Locking a cube pins its world pose: when an ancestor moves, the locked
//! cube's local parameters are rewritten so it stays where it was. Unlocked
//! children of a locked cube keep following the edit, so they are captured
//! after the edit and replayed once their locked parent has been restored.
//!
//! The lock set is keyed by cube identifier rather than [`CubeId`], so cubes
//! recreated by undo/redo or loaded from a file stay locked.

use std::collections::{BTreeSet, HashSet};

use log::{debug, warn};

use crate::animation::PoseSnapshot;
use crate::error::Result;
use crate::locker::{LockerCache, LockerType};
use crate::model::{Cube, CubeId, Model};
use crate::selection::Selection;

/// Lock set plus the caches used around one structural edit
#[derive(Debug, Clone, Default)]
pub struct LockedCubes {
    locked: BTreeSet<String>,
    locked_children_cache: LockerCache,
    moving_children_cache: BTreeSet<CubeId>,
}

impl LockedCubes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a list of locked identifiers
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locked: identifiers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn lock(&mut self, cube: &Cube) {
        self.locked.insert(cube.identifier().to_string());
    }

    pub fn unlock(&mut self, cube: &Cube) {
        self.locked.remove(cube.identifier());
    }

    pub fn is_locked(&self, cube: &Cube) -> bool {
        self.locked.contains(cube.identifier())
    }

    pub fn lock_identifier(&mut self, identifier: impl Into<String>) {
        self.locked.insert(identifier.into());
    }

    pub fn unlock_identifier(&mut self, identifier: &str) {
        self.locked.remove(identifier);
    }

    pub fn is_identifier_locked(&self, identifier: &str) -> bool {
        self.locked.contains(identifier)
    }

    /// Locked identifiers in sorted order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.locked.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked.is_empty()
    }

    /// Lockers for the top-most locked cubes, by level
    pub fn locked_children_cache(&self) -> &LockerCache {
        &self.locked_children_cache
    }

    /// Unlocked cubes directly below a locked cube
    pub fn moving_children_cache(&self) -> &BTreeSet<CubeId> {
        &self.moving_children_cache
    }

    /// Capture a locker for `cube` into the locked children cache
    pub fn add_to_locker(&mut self, model: &Model, cube: CubeId, kind: LockerType) -> Result<()> {
        self.locked_children_cache.add(model, cube, kind)
    }

    /// Build the caches from the manager's own lock set
    pub fn create_locked_cubes_cache(
        &mut self,
        model: &Model,
        selection: &Selection,
        direct_move: bool,
    ) -> Result<()> {
        let locked = self.locked.clone();
        self.build_cache(model, selection, &locked, direct_move)
    }

    /// Build the caches for an explicit set of locked identifiers
    pub fn create_locked_cubes_cache_with<'a>(
        &mut self,
        model: &Model,
        selection: &Selection,
        identifiers: impl IntoIterator<Item = &'a str>,
        direct_move: bool,
    ) -> Result<()> {
        let locked: BTreeSet<String> = identifiers.into_iter().map(str::to_string).collect();
        self.build_cache(model, selection, &locked, direct_move)
    }

    fn build_cache(
        &mut self,
        model: &Model,
        selection: &Selection,
        locked: &BTreeSet<String>,
        direct_move: bool,
    ) -> Result<()> {
        self.locked_children_cache.clear();
        self.moving_children_cache.clear();

        for identifier in locked {
            let Some(id) = model.find_by_identifier(identifier) else {
                warn!("Locked cube '{identifier}' no longer exists, skipping");
                continue;
            };
            if !direct_move && selection.is_selected(id) {
                debug!("Locked cube '{identifier}' is being moved directly, not pinning it");
                continue;
            }

            self.traverse_unlocked_cubes(model, id, locked);

            let parent_locked = model
                .get(id)?
                .parent()
                .and_then(|parent| model.cube(parent))
                .is_some_and(|parent| locked.contains(parent.identifier()));
            if !parent_locked {
                self.add_to_locker(model, id, LockerType::PositionAndRotation)?;
            }
        }

        debug!(
            "Locked cube cache: {} lockers over {} levels, {} moving children",
            self.locked_children_cache.len(),
            self.locked_children_cache.levels().count(),
            self.moving_children_cache.len()
        );
        Ok(())
    }

    /// Collect every unlocked descendant whose parent is locked
    fn traverse_unlocked_cubes(&mut self, model: &Model, id: CubeId, locked: &BTreeSet<String>) {
        let mut visited = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(cube) = model.cube(current) else {
                continue;
            };
            let current_locked = locked.contains(cube.identifier());
            for &child in cube.children() {
                let Some(child_cube) = model.cube(child) else {
                    continue;
                };
                if current_locked && !locked.contains(child_cube.identifier()) {
                    self.moving_children_cache.insert(child);
                }
                stack.push(child);
            }
        }
    }

    /// Restore locked cubes after an edit
    ///
    /// World matrices are refreshed from the root first. Lockers for moving
    /// children are captured now, from the edited pose, and replayed after
    /// their locked parent. Levels are processed in ascending order.
    pub fn reconstruct_locked_cubes(&self, model: &mut Model, also_replay_moving: bool) -> Result<()> {
        model.update_world_matrices()?;

        let mut moving_cache = LockerCache::new();
        if also_replay_moving {
            for &id in &self.moving_children_cache {
                if model.contains(id) {
                    moving_cache.add(model, id, LockerType::PositionAndRotation)?;
                }
            }
        }

        let levels: BTreeSet<usize> = self
            .locked_children_cache
            .levels()
            .chain(moving_cache.levels())
            .collect();

        for level in levels {
            let lockers = self
                .locked_children_cache
                .at_level(level)
                .iter()
                .chain(moving_cache.at_level(level));
            for locker in lockers {
                if !model.contains(locker.cube()) {
                    continue;
                }
                locker.reconstruct(model)?;
                model.force_update_world_matrix(locker.cube(), true)?;
            }
        }
        Ok(())
    }

    /// Drop both caches
    pub fn clear_cache(&mut self) {
        self.locked_children_cache.clear();
        self.moving_children_cache.clear();
    }

    /// Run one edit with locked cubes pinned around it
    pub fn edit_preserving_locks<T>(
        &mut self,
        model: &mut Model,
        selection: &Selection,
        edit: impl FnOnce(&mut Model) -> Result<T>,
    ) -> Result<T> {
        self.create_locked_cubes_cache(model, selection, false)?;
        let result = edit(model)?;
        self.reconstruct_locked_cubes(model, true)?;
        self.clear_cache();
        Ok(result)
    }

    /// Apply an animation pose while keeping locked cubes pinned
    pub fn apply_pose_preserving_locks(&mut self, model: &mut Model, pose: &PoseSnapshot) -> Result<()> {
        self.edit_preserving_locks(model, &Selection::new(), |model| pose.apply(model))
    }
}
