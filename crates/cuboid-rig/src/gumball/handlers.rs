//! Translate, rotate and dimension updates

use glam::DVec3;

use super::{Gumball, RotationAnchor, TranslateTarget, rotation_delta};
use crate::error::Result;
use crate::locked::LockedCubes;
use crate::math::{Decomposed, align_axis, euler_degrees_from_quat};
use crate::model::Model;

impl Gumball {
    /// Move the selection `length` blocks along `axis`
    pub fn translate(
        &self,
        model: &mut Model,
        locked: &LockedCubes,
        axis: DVec3,
        length: f64,
    ) -> Result<()> {
        self.restore_initial(model)?;
        let units = model.units_per_block();
        let target = self.config.translate_target;

        self.for_each_cube(model, axis, |model, axis, cached| {
            let delta = axis * length * units;
            match target {
                TranslateTarget::Offset => {
                    if locked.is_locked(model.get(cached.id)?) {
                        return Ok(());
                    }
                    // offset lives in the cube frame, one rotation further in
                    let local = cached.rotation.inverse() * delta;
                    model.set_offset(cached.id, cached.offset + local)
                }
                TranslateTarget::Position | TranslateTarget::RotationPoint => {
                    model.set_position(cached.id, cached.position + delta)
                }
            }
        })?;

        self.finish_segment(model, locked)
    }

    /// Rotate the selection by `angle` degrees around `axis`
    pub fn rotate(
        &self,
        model: &mut Model,
        locked: &LockedCubes,
        axis: DVec3,
        angle: f64,
    ) -> Result<()> {
        self.restore_initial(model)?;
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return self.finish_segment(model, locked);
        }

        let units = model.units_per_block();
        let radians = angle.to_radians();
        let world_delta = rotation_delta(self.world_axis(axis)?, radians);
        let anchor = self.config.rotation_anchor;

        self.for_each_cube(model, axis, |model, axis, cached| {
            let rotation = rotation_delta(axis, radians) * cached.rotation;
            model.set_rotation(cached.id, euler_degrees_from_quat(rotation))?;

            if let RotationAnchor::Point(point) = anchor {
                let rotated = point + world_delta * (cached.world_position - point);
                let parent = Decomposed::from_matrix(&model.parent_world_matrix(cached.id)?);
                let correction =
                    parent.rotation.inverse() * (rotated - cached.world_position) * units;
                model.set_position(cached.id, cached.position + correction)?;
            }
            Ok(())
        })?;

        self.finish_segment(model, locked)
    }

    /// Grow or shrink the selection along the cardinal axis closest to `axis`
    ///
    /// The length is converted to whole model units, rounding down. Growing
    /// along a negative axis shifts the offset so the opposite face stays put.
    /// A shrink that would go below zero stops at zero.
    pub fn dimensions(
        &self,
        model: &mut Model,
        locked: &LockedCubes,
        axis: DVec3,
        length: f64,
    ) -> Result<()> {
        self.restore_initial(model)?;
        if axis.length_squared() <= f64::EPSILON {
            return self.finish_segment(model, locked);
        }
        let amount = (length * model.units_per_block()).floor();

        self.for_each_cube(model, axis, |model, axis, cached| {
            let aligned = align_axis(cached.rotation.inverse() * axis);
            let mut dimension = cached.dimension;
            let mut offset = cached.offset;
            for i in 0..3 {
                let component = aligned[i];
                if component.abs() < f64::EPSILON {
                    continue;
                }
                let mut grow = amount;
                if component.abs() * grow + cached.dimension[i] < 0.0 {
                    grow = -cached.dimension[i] / component.abs();
                }
                dimension[i] = (component.abs() * grow + cached.dimension[i]).max(0.0);
                if component < 0.0 {
                    offset[i] += component * grow;
                }
            }
            model.set_dimension(cached.id, dimension)?;
            model.set_offset(cached.id, offset)
        })?;

        self.finish_segment(model, locked)
    }
}
