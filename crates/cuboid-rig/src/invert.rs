//! Turning cubes half way around their own Z axis
//!
//! Inverting a cube negates rotation X and Y and moves rotation Z half a turn
//! (towards zero, with zero itself counting as negative). The offset is
//! flipped on X and Y so the box keeps covering the same volume. Inverting
//! twice restores the original values.

use std::collections::BTreeSet;

use log::debug;

use crate::error::Result;
use crate::locker::{LockerCache, LockerType};
use crate::math::invert_sign;
use crate::model::{CubeId, CubeLocalState, Model};
use crate::selection::Selection;

/// Inverted copy of a cube's local state
pub fn invert_local_state(state: &CubeLocalState) -> CubeLocalState {
    let mut inverted = *state;
    inverted.rotation.x = -state.rotation.x;
    inverted.rotation.y = -state.rotation.y;
    inverted.rotation.z = state.rotation.z - 180.0 * invert_sign(state.rotation.z);
    inverted.offset.x = -state.offset.x - state.dimension.x;
    inverted.offset.y = -state.offset.y - state.dimension.y;
    inverted
}

/// Invert every cube of the model
pub fn invert_all(model: &mut Model) -> Result<Vec<CubeId>> {
    let targets = model.iter_by_level();
    invert_targets(model, targets)
}

/// Invert the selected cubes
///
/// Children of an inverted cube that are not selected keep their world pose.
pub fn invert_selection(model: &mut Model, selection: &Selection) -> Result<Vec<CubeId>> {
    let targets = selection.by_level(model);
    invert_targets(model, targets)
}

fn invert_targets(model: &mut Model, targets: Vec<CubeId>) -> Result<Vec<CubeId>> {
    let target_set: BTreeSet<CubeId> = targets.iter().copied().collect();

    let mut restore = LockerCache::new();
    for &id in &targets {
        for &child in model.get(id)?.children() {
            if !target_set.contains(&child) {
                restore.add(model, child, LockerType::PositionAndRotation)?;
            }
        }
    }

    let mut levels: BTreeSet<usize> = restore.levels().collect();
    for &id in &targets {
        levels.insert(model.get(id)?.hierarchy_level());
    }

    for level in levels {
        for &id in &targets {
            let cube = model.get(id)?;
            if cube.hierarchy_level() == level {
                let inverted = invert_local_state(cube.local());
                model.set_local_state(id, &inverted)?;
            }
        }
        for locker in restore.at_level(level) {
            locker.reconstruct(model)?;
        }
    }

    debug!(
        "Inverted {} cubes, restored {} children",
        targets.len(),
        restore.len()
    );
    Ok(targets)
}
