//! Mirroring cubes across a world-space plane
//!
//! Each target cube is moved to the reflection of its world pose. The cube
//! frame of a mirrored cube is the reflected frame with its X axis flipped
//! back (cube frames have no reflection), and the offset is corrected so the
//! box covers the reflected volume. Children of a target that are not
//! targets themselves keep their world pose.
//!
//! A [`MirrorOperation`] computes start and end states of every touched cube
//! up front, so a preview can be shown with [`MirrorOperation::apply`] and
//! reverted exactly with [`MirrorOperation::on_exit`].

use std::collections::{BTreeMap, BTreeSet};

use glam::{DMat3, DMat4, DVec3};
use log::debug;

use crate::error::{Result, RigError};
use crate::locker::{LockerCache, LockerType};
use crate::math::{Decomposed, UNIT_AXES, format_vec, mirror_point, validate_normal};
use crate::model::{CubeId, CubeLocalState, Model};
use crate::selection::Selection;

/// Mirror plane through `point` with normal `normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorPlane {
    point: DVec3,
    normal: DVec3,
}

impl MirrorPlane {
    /// The normal does not need to be unit length but must have a direction
    pub fn new(point: DVec3, normal: DVec3) -> Result<Self> {
        if !validate_normal(normal) || !point.is_finite() {
            return Err(RigError::InvalidMirrorAxis(format_vec(normal)));
        }
        Ok(Self { point, normal })
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn mirror_point(&self, v: DVec3) -> DVec3 {
        mirror_point(v, self.point, self.normal)
    }

    /// Reflect a world matrix: origin and axis endpoints are mirrored, scale kept
    pub fn mirror_matrix(&self, world: &DMat4) -> DMat4 {
        let decomposed = Decomposed::from_matrix(world);
        let origin = self.mirror_point(decomposed.translation);
        let [x, y, z] = UNIT_AXES.map(|axis| {
            let end = decomposed.translation + decomposed.rotation * axis;
            (self.mirror_point(end) - origin).normalize()
        });
        DMat4::from_translation(origin)
            * DMat4::from_mat3(DMat3::from_cols(x, y, z))
            * DMat4::from_scale(decomposed.scale)
    }
}

/// Start and end local state of one touched cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorEntry {
    pub cube: CubeId,
    pub start: CubeLocalState,
    pub end: CubeLocalState,
    /// False for children restored to their world pose
    pub mirrored: bool,
}

/// A prepared mirror of a set of cubes
#[derive(Debug, Clone)]
pub struct MirrorOperation {
    plane: MirrorPlane,
    entries: Vec<MirrorEntry>,
}

impl MirrorOperation {
    /// Compute the mirror of `selection` without leaving it applied
    ///
    /// The model is mirrored to derive the end states and then put back to
    /// the start states, so on return it is unchanged.
    pub fn prepare(model: &mut Model, selection: &Selection, plane: MirrorPlane) -> Result<Self> {
        let targets = selection.by_level(model);
        let target_set: BTreeSet<CubeId> = targets.iter().copied().collect();

        let mut originals = BTreeMap::new();
        let mut restore = LockerCache::new();
        let mut touched = targets.clone();
        for &id in &targets {
            let cube = model.get(id)?;
            originals.insert(id, (cube.world_matrix(), cube.mesh_world_matrix(), cube.dimension()));
            for &child in cube.children() {
                if !target_set.contains(&child) {
                    restore.add(model, child, LockerType::PositionAndRotation)?;
                    touched.push(child);
                }
            }
        }
        model.sort_by_level(&mut touched);

        let start: Vec<(CubeId, CubeLocalState)> = touched
            .iter()
            .map(|&id| Ok((id, model.local_state(id)?)))
            .collect::<Result<_>>()?;

        let levels: BTreeSet<usize> = touched
            .iter()
            .filter_map(|id| model.cube(*id).map(|c| c.hierarchy_level()))
            .collect();
        for level in levels {
            for &id in &targets {
                if model.get(id)?.hierarchy_level() != level {
                    continue;
                }
                if let Some((world, mesh, dimension)) = originals.get(&id) {
                    mirror_cube(model, id, &plane, world, mesh, *dimension)?;
                }
            }
            for locker in restore.at_level(level) {
                locker.reconstruct(model)?;
            }
        }

        let mut entries = Vec::with_capacity(start.len());
        for (id, start_state) in start {
            entries.push(MirrorEntry {
                cube: id,
                start: start_state,
                end: model.local_state(id)?,
                mirrored: target_set.contains(&id),
            });
        }

        let operation = Self { plane, entries };
        operation.on_exit(model)?;

        debug!(
            "Prepared mirror across {} / {}: {} mirrored, {} restored",
            format_vec(plane.point),
            format_vec(plane.normal),
            targets.len(),
            operation.entries.len() - targets.len()
        );
        Ok(operation)
    }

    pub fn plane(&self) -> &MirrorPlane {
        &self.plane
    }

    /// Touched cubes, parents first
    pub fn entries(&self) -> &[MirrorEntry] {
        &self.entries
    }

    pub fn entry(&self, cube: CubeId) -> Option<&MirrorEntry> {
        self.entries.iter().find(|e| e.cube == cube)
    }

    /// Write the end states
    pub fn apply(&self, model: &mut Model) -> Result<()> {
        for entry in &self.entries {
            if model.contains(entry.cube) {
                model.set_local_state(entry.cube, &entry.end)?;
            }
        }
        Ok(())
    }

    /// Write the start states back, undoing a preview
    pub fn on_exit(&self, model: &mut Model) -> Result<()> {
        for entry in &self.entries {
            if model.contains(entry.cube) {
                model.set_local_state(entry.cube, &entry.start)?;
            }
        }
        Ok(())
    }
}

/// Prepare and apply a mirror in one step
///
/// Rotations are written back as Euler ZYX degrees decomposed from the
/// reflected frame. At rotation Y = ±90 the decomposition is not unique, so
/// mirroring twice restores the pose but the stored angles can differ, e.g.
/// `(20, 90, 10)` may come back as `(0, 90, -10)`.
pub fn mirror(
    model: &mut Model,
    selection: &Selection,
    point: DVec3,
    normal: DVec3,
) -> Result<MirrorOperation> {
    let operation = MirrorOperation::prepare(model, selection, MirrorPlane::new(point, normal)?)?;
    operation.apply(model)?;
    Ok(operation)
}

/// Move one cube onto the reflection of its original world pose
fn mirror_cube(
    model: &mut Model,
    id: CubeId,
    plane: &MirrorPlane,
    original_world: &DMat4,
    original_mesh: &DMat4,
    dimension: DVec3,
) -> Result<()> {
    let target = plane.mirror_matrix(original_world);
    let local = Decomposed::from_matrix(&(model.parent_world_matrix(id)?.inverse() * target));
    model.set_position(id, local.translation)?;
    model.set_rotation(id, local.euler_degrees())?;

    // Box corners at the old offset versus where the reflected box needs them
    let cube = model.get(id)?;
    let mesh = cube.mesh_world_matrix();
    let delta_min =
        plane.mirror_point(original_mesh.transform_point3(DVec3::ZERO)) - mesh.transform_point3(DVec3::ZERO);
    let delta_max =
        plane.mirror_point(original_mesh.transform_point3(dimension)) - mesh.transform_point3(dimension);

    let world_rotation = Decomposed::from_matrix(&cube.world_matrix()).rotation;
    let correction =
        world_rotation.inverse() * (delta_min + delta_max) * (model.units_per_block() / 2.0);
    let offset = cube.offset() + correction;
    model.set_offset(id, offset)
}
