//! Interactive transform gestures over the selected cubes
//!
//! A gesture is `mouse_down`, any number of updates, then `mouse_up`. Every
//! update is absolute: it starts from the local values cached at `mouse_down`
//! and applies the total gesture amount so far, so repeating an update with
//! the same amount gives the same model.
//!
//! Gesture amounts are in world (block) units: translation lengths and
//! dimension lengths are multiplied by the model's `units_per_block` before
//! they reach the cube's local parameters.

mod handlers;
mod state;

use glam::{DQuat, DVec3};

use crate::error::{Result, RigError};
use crate::locked::LockedCubes;
use crate::math::Decomposed;
use crate::model::Model;

pub use state::CachedCube;
use state::GestureState;

/// What a gesture changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GumballMode {
    #[default]
    Translate,
    Rotate,
    Dimensions,
}

/// Frame the gesture axis is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformSpace {
    /// Axis is relative to the first selected root cube
    Local,
    #[default]
    World,
}

/// Local parameter a translate gesture writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslateTarget {
    #[default]
    Position,
    /// Move the box inside its cube frame; locked cubes are left alone
    Offset,
    /// Move the rotation point while the box and children stay in place
    RotationPoint,
}

/// Pivot of a rotate gesture
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotationAnchor {
    #[default]
    CubeOrigin,
    /// A world-space point; the cube position orbits around it
    Point(DVec3),
}

/// Gumball settings, fixed for the duration of a gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GumballConfig {
    pub mode: GumballMode,
    pub space: TransformSpace,
    /// Only move selected cubes that have no selected ancestor
    pub move_as_root_only: bool,
    pub translate_target: TranslateTarget,
    pub rotation_anchor: RotationAnchor,
}

impl Default for GumballConfig {
    fn default() -> Self {
        Self {
            mode: GumballMode::Translate,
            space: TransformSpace::World,
            move_as_root_only: true,
            translate_target: TranslateTarget::Position,
            rotation_anchor: RotationAnchor::CubeOrigin,
        }
    }
}

/// Gesture dispatcher
#[derive(Debug, Default)]
pub struct Gumball {
    config: GumballConfig,
    gesture: Option<GestureState>,
}

impl Gumball {
    pub fn new(config: GumballConfig) -> Self {
        Self {
            config,
            gesture: None,
        }
    }

    pub fn config(&self) -> &GumballConfig {
        &self.config
    }

    /// Change the settings; rejected while a gesture is active
    pub fn set_config(&mut self, config: GumballConfig) -> Result<()> {
        if self.gesture.is_some() {
            return Err(RigError::GestureInProgress);
        }
        self.config = config;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Cubes captured by the active gesture, parents first
    pub fn cached_cubes(&self) -> &[CachedCube] {
        self.gesture
            .as_ref()
            .map(|g| g.cubes.as_slice())
            .unwrap_or(&[])
    }

    /// Apply a gesture update in the configured mode
    ///
    /// `amount` is a length in blocks for translate and dimensions, and an
    /// angle in degrees for rotate.
    pub fn update(
        &self,
        model: &mut Model,
        locked: &LockedCubes,
        axis: DVec3,
        amount: f64,
    ) -> Result<()> {
        match self.config.mode {
            GumballMode::Translate => self.translate(model, locked, axis, amount),
            GumballMode::Rotate => self.rotate(model, locked, axis, amount),
            GumballMode::Dimensions => self.dimensions(model, locked, axis, amount),
        }
    }

    fn active(&self) -> Result<&GestureState> {
        self.gesture.as_ref().ok_or(RigError::NoActiveGesture)
    }

    /// Gesture axis in world space
    fn world_axis(&self, axis: DVec3) -> Result<DVec3> {
        let gesture = self.active()?;
        Ok(match self.config.space {
            TransformSpace::Local => gesture.anchor_rotation * axis,
            TransformSpace::World => axis,
        })
    }

    /// Run `callback` for every cube the gesture moves
    ///
    /// The callback receives the axis expressed in the cube's parent frame:
    /// the world axis rotated by the inverse of the parent's current world
    /// rotation. Cubes are visited parents first, so a parent written by an
    /// earlier callback is already refreshed when its child is reached.
    fn for_each_cube(
        &self,
        model: &mut Model,
        axis: DVec3,
        mut callback: impl FnMut(&mut Model, DVec3, &CachedCube) -> Result<()>,
    ) -> Result<()> {
        let gesture = self.active()?;
        let world_axis = self.world_axis(axis)?;
        for cached in &gesture.cubes {
            if self.config.move_as_root_only && !cached.root {
                continue;
            }
            if !model.contains(cached.id) {
                continue;
            }
            let parent = Decomposed::from_matrix(&model.parent_world_matrix(cached.id)?);
            let parent_axis = parent.rotation.inverse() * world_axis;
            callback(model, parent_axis, cached)?;
        }
        Ok(())
    }

    /// Put every cube the gesture may touch back to its `mouse_down` state
    fn restore_initial(&self, model: &mut Model) -> Result<()> {
        for (id, state) in &self.active()?.initial {
            if model.contains(*id) {
                model.set_local_state(*id, state)?;
            }
        }
        Ok(())
    }

    /// Replay rotation point lockers, then pin locked cubes
    fn finish_segment(&self, model: &mut Model, locked: &LockedCubes) -> Result<()> {
        self.active()?.rotation_point_lockers.reconstruct_all(model)?;
        locked.reconstruct_locked_cubes(model, true)
    }
}

fn rotation_delta(axis: DVec3, radians: f64) -> DQuat {
    DQuat::from_axis_angle(axis.normalize(), radians)
}
