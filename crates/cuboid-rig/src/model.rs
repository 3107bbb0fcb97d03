//! Cube hierarchy and world matrix propagation
//!
//! A [`Model`] owns every [`Cube`] in an index arena. Cubes refer to their
//! parent and children by [`CubeId`]; the stable, user-facing handle is the
//! cube's string identifier, which survives serialization and undo/redo.
//!
//! Each cube carries two frames:
//! - the cube frame, `parent_world * translate(position) * rotate(rotation)`
//! - the mesh frame, `cube_world * translate(offset)`, where the box spans
//!   `[0, dimension]` (padded by `cube_grow` on every side)
//!
//! Root cubes use the model root frame, `scale(1 / units_per_block)`, as their
//! parent. Every setter refreshes the world matrices of the edited subtree
//! before returning, so a world matrix read through the public API is never
//! stale.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use glam::{DMat4, DQuat, DVec3};

use crate::error::{Result, RigError};
use crate::math::{Decomposed, format_vec, quat_from_euler_degrees};

/// Index of a cube inside its [`Model`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeId(usize);

impl CubeId {
    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Model-wide configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    /// Model units per world block; local parameters are in model units
    pub units_per_block: f64,
}

impl ModelConfig {
    /// Check that the root frame built from this config is invertible
    pub fn validate(&self) -> Result<()> {
        if self.units_per_block.is_finite() && self.units_per_block > 0.0 {
            Ok(())
        } else {
            Err(RigError::InvalidUnitsPerBlock(self.units_per_block))
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            units_per_block: 16.0,
        }
    }
}

/// All local (editable) parameters of a cube
///
/// This is the unit undo/redo systems diff and the value mirror previews
/// cache for their start and end states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeLocalState {
    pub dimension: DVec3,
    pub offset: DVec3,
    pub position: DVec3,
    pub rotation: DVec3,
    pub cube_grow: DVec3,
    pub texture_offset: [u32; 2],
}

impl Default for CubeLocalState {
    fn default() -> Self {
        Self {
            dimension: DVec3::ONE,
            offset: DVec3::ZERO,
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            cube_grow: DVec3::ZERO,
            texture_offset: [0, 0],
        }
    }
}

/// Description of a cube to insert into a model
#[derive(Debug, Clone, Default)]
pub struct CubeDefinition {
    /// Unique identifier; generated when `None`
    pub identifier: Option<String>,
    /// Display name, not required to be unique
    pub name: String,
    pub local: CubeLocalState,
}

impl CubeDefinition {
    /// Create a definition with default parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identifier: None,
            name: name.into(),
            local: CubeLocalState::default(),
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_dimension(mut self, dimension: DVec3) -> Self {
        self.local.dimension = dimension;
        self
    }

    pub fn with_offset(mut self, offset: DVec3) -> Self {
        self.local.offset = offset;
        self
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.local.position = position;
        self
    }

    /// Euler ZYX rotation in degrees
    pub fn with_rotation(mut self, rotation: DVec3) -> Self {
        self.local.rotation = rotation;
        self
    }

    pub fn with_cube_grow(mut self, cube_grow: DVec3) -> Self {
        self.local.cube_grow = cube_grow;
        self
    }

    pub fn with_texture_offset(mut self, texture_offset: [u32; 2]) -> Self {
        self.local.texture_offset = texture_offset;
        self
    }
}

/// A node of the cube hierarchy
#[derive(Debug, Clone)]
pub struct Cube {
    identifier: String,
    name: String,
    local: CubeLocalState,
    parent: Option<CubeId>,
    children: Vec<CubeId>,
    hierarchy_level: usize,
    local_matrix: DMat4,
    world_matrix: DMat4,
}

impl Cube {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local(&self) -> &CubeLocalState {
        &self.local
    }

    pub fn dimension(&self) -> DVec3 {
        self.local.dimension
    }

    pub fn offset(&self) -> DVec3 {
        self.local.offset
    }

    /// Translation of the cube frame relative to its parent (rotation point)
    pub fn position(&self) -> DVec3 {
        self.local.position
    }

    /// Euler ZYX rotation in degrees
    pub fn rotation(&self) -> DVec3 {
        self.local.rotation
    }

    pub fn cube_grow(&self) -> DVec3 {
        self.local.cube_grow
    }

    pub fn texture_offset(&self) -> [u32; 2] {
        self.local.texture_offset
    }

    pub fn parent(&self) -> Option<CubeId> {
        self.parent
    }

    pub fn children(&self) -> &[CubeId] {
        &self.children
    }

    /// Distance from the root; root cubes are level 0
    pub fn hierarchy_level(&self) -> usize {
        self.hierarchy_level
    }

    pub fn local_matrix(&self) -> DMat4 {
        self.local_matrix
    }

    pub fn world_matrix(&self) -> DMat4 {
        self.world_matrix
    }

    /// World matrix of the box mesh frame
    pub fn mesh_world_matrix(&self) -> DMat4 {
        self.world_matrix * DMat4::from_translation(self.local.offset)
    }
}

/// The cube hierarchy of one model
#[derive(Debug, Clone)]
pub struct Model {
    config: ModelConfig,
    root_matrix: DMat4,
    cubes: Vec<Option<Cube>>,
    roots: Vec<CubeId>,
    identifiers: HashMap<String, CubeId>,
    next_serial: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self::from_valid_config(ModelConfig::default())
    }
}

impl Model {
    /// Create an empty model
    ///
    /// Fails with [`RigError::InvalidUnitsPerBlock`] unless `units_per_block`
    /// is finite and positive.
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ModelConfig) -> Self {
        Self {
            config,
            root_matrix: DMat4::from_scale(DVec3::splat(1.0 / config.units_per_block)),
            cubes: Vec::new(),
            roots: Vec::new(),
            identifiers: HashMap::new(),
            next_serial: 0,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn units_per_block(&self) -> f64 {
        self.config.units_per_block
    }

    /// World matrix of the model root frame
    pub fn root_matrix(&self) -> DMat4 {
        self.root_matrix
    }

    /// Number of live cubes
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Top-level cubes in insertion order
    pub fn roots(&self) -> &[CubeId] {
        &self.roots
    }

    pub fn contains(&self, id: CubeId) -> bool {
        self.cube(id).is_some()
    }

    pub fn cube(&self, id: CubeId) -> Option<&Cube> {
        self.cubes.get(id.0).and_then(Option::as_ref)
    }

    /// Like [`Model::cube`] but with an error for unknown ids
    pub fn get(&self, id: CubeId) -> Result<&Cube> {
        self.cube(id).ok_or(RigError::UnknownCube(id))
    }

    fn get_mut(&mut self, id: CubeId) -> Result<&mut Cube> {
        self.cubes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(RigError::UnknownCube(id))
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<CubeId> {
        self.identifiers.get(identifier).copied()
    }

    /// First cube (in hierarchy order) with the given display name
    pub fn find_by_name(&self, name: &str) -> Option<CubeId> {
        self.iter_by_level()
            .into_iter()
            .find(|id| self.cube(*id).is_some_and(|c| c.name == name))
    }

    /// Identifier of a cube, or its id when unknown (for messages)
    pub fn describe(&self, id: CubeId) -> String {
        self.cube(id)
            .map_or_else(|| id.to_string(), |c| c.identifier.clone())
    }

    /// Add a cube under `parent` (or as a root) and compute its matrices
    pub fn add_cube(&mut self, parent: Option<CubeId>, definition: CubeDefinition) -> Result<CubeId> {
        let identifier = match definition.identifier {
            Some(identifier) => {
                if self.identifiers.contains_key(&identifier) {
                    return Err(RigError::DuplicateIdentifier(identifier));
                }
                identifier
            }
            None => self.generate_identifier(),
        };
        validate_local(&identifier, &definition.local)?;

        let hierarchy_level = match parent {
            Some(parent) => self.get(parent)?.hierarchy_level + 1,
            None => 0,
        };

        let id = CubeId(self.cubes.len());
        self.cubes.push(Some(Cube {
            identifier: identifier.clone(),
            name: definition.name,
            local: definition.local,
            parent,
            children: Vec::new(),
            hierarchy_level,
            local_matrix: DMat4::IDENTITY,
            world_matrix: DMat4::IDENTITY,
        }));
        self.identifiers.insert(identifier, id);

        match parent {
            Some(parent) => self.get_mut(parent)?.children.push(id),
            None => self.roots.push(id),
        }

        self.force_update_world_matrix(id, false)?;
        Ok(id)
    }

    fn generate_identifier(&mut self) -> String {
        loop {
            self.next_serial += 1;
            let candidate = format!("cube-{}", self.next_serial);
            if !self.identifiers.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Remove a cube and its whole subtree, returning the removed identifiers
    pub fn remove_cube(&mut self, id: CubeId) -> Result<Vec<String>> {
        let parent = self.get(id)?.parent;
        match parent {
            Some(parent) => self.get_mut(parent)?.children.retain(|c| *c != id),
            None => self.roots.retain(|c| *c != id),
        }

        let mut removed = Vec::new();
        for cube_id in self.subtree(id) {
            if let Some(cube) = self.cubes.get_mut(cube_id.0).and_then(Option::take) {
                self.identifiers.remove(&cube.identifier);
                removed.push(cube.identifier);
            }
        }
        Ok(removed)
    }

    /// Move a cube under a new parent
    ///
    /// Local parameters are kept unchanged, so the cube's world pose follows
    /// the new parent. Use a [`crate::CubeLocker`] around the call to keep the
    /// world pose instead.
    pub fn reparent(&mut self, id: CubeId, new_parent: Option<CubeId>) -> Result<()> {
        if let Some(parent) = new_parent {
            self.get(parent)?;
            if parent == id || self.is_ancestor(id, parent) {
                return Err(RigError::HierarchyCycle {
                    child: self.describe(id),
                    parent: self.describe(parent),
                });
            }
        }

        let old_parent = self.get(id)?.parent;
        match old_parent {
            Some(parent) => self.get_mut(parent)?.children.retain(|c| *c != id),
            None => self.roots.retain(|c| *c != id),
        }
        match new_parent {
            Some(parent) => self.get_mut(parent)?.children.push(id),
            None => self.roots.push(id),
        }
        self.get_mut(id)?.parent = new_parent;

        let base = match new_parent {
            Some(parent) => self.get(parent)?.hierarchy_level + 1,
            None => 0,
        };
        let top_level = self.get(id)?.hierarchy_level;
        for cube_id in self.subtree(id) {
            let cube = self.get_mut(cube_id)?;
            cube.hierarchy_level = cube.hierarchy_level - top_level + base;
        }

        self.force_update_world_matrix(id, true)
    }

    /// True when `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: CubeId, id: CubeId) -> bool {
        let mut current = self.cube(id).and_then(|c| c.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.cube(parent).and_then(|c| c.parent);
        }
        false
    }

    /// The cube and all its descendants, parents before children
    pub fn subtree(&self, id: CubeId) -> Vec<CubeId> {
        let mut result = Vec::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if let Some(cube) = self.cube(current) {
                result.push(current);
                queue.extend(cube.children.iter().copied());
            }
        }
        result
    }

    /// Every cube in non-decreasing hierarchy level order
    pub fn iter_by_level(&self) -> Vec<CubeId> {
        let mut result = Vec::with_capacity(self.len());
        let mut queue: VecDeque<CubeId> = self.roots.iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            if let Some(cube) = self.cube(current) {
                result.push(current);
                queue.extend(cube.children.iter().copied());
            }
        }
        result
    }

    /// Stable sort of `ids` by hierarchy level; unknown ids sort last
    pub fn sort_by_level(&self, ids: &mut [CubeId]) {
        ids.sort_by_key(|id| self.cube(*id).map_or(usize::MAX, Cube::hierarchy_level));
    }

    /// Deepest hierarchy level in the model
    pub fn max_level(&self) -> Option<usize> {
        self.cubes.iter().flatten().map(|c| c.hierarchy_level).max()
    }

    /// Snapshot of every local parameter of a cube
    pub fn local_state(&self, id: CubeId) -> Result<CubeLocalState> {
        Ok(self.get(id)?.local)
    }

    /// Restore a snapshot taken with [`Model::local_state`]
    pub fn set_local_state(&mut self, id: CubeId, state: &CubeLocalState) -> Result<()> {
        validate_local(&self.describe(id), state)?;
        self.get_mut(id)?.local = *state;
        self.force_update_world_matrix(id, true)
    }

    pub fn set_position(&mut self, id: CubeId, position: DVec3) -> Result<()> {
        self.check_finite(id, "position", position)?;
        self.get_mut(id)?.local.position = position;
        self.force_update_world_matrix(id, true)
    }

    /// Set the Euler ZYX rotation in degrees
    pub fn set_rotation(&mut self, id: CubeId, rotation: DVec3) -> Result<()> {
        self.check_finite(id, "rotation", rotation)?;
        self.get_mut(id)?.local.rotation = rotation;
        self.force_update_world_matrix(id, true)
    }

    pub fn set_offset(&mut self, id: CubeId, offset: DVec3) -> Result<()> {
        self.check_finite(id, "offset", offset)?;
        self.get_mut(id)?.local.offset = offset;
        Ok(())
    }

    pub fn set_dimension(&mut self, id: CubeId, dimension: DVec3) -> Result<()> {
        self.check_size(id, "dimension", dimension)?;
        self.get_mut(id)?.local.dimension = dimension;
        Ok(())
    }

    pub fn set_cube_grow(&mut self, id: CubeId, cube_grow: DVec3) -> Result<()> {
        self.check_size(id, "cube grow", cube_grow)?;
        self.get_mut(id)?.local.cube_grow = cube_grow;
        Ok(())
    }

    pub fn set_texture_offset(&mut self, id: CubeId, texture_offset: [u32; 2]) -> Result<()> {
        self.get_mut(id)?.local.texture_offset = texture_offset;
        Ok(())
    }

    pub fn set_name(&mut self, id: CubeId, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    fn check_finite(&self, id: CubeId, field: &'static str, value: DVec3) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(RigError::NonFinite {
                cube: self.describe(id),
                field,
                value: format_vec(value),
            })
        }
    }

    fn check_size(&self, id: CubeId, field: &'static str, value: DVec3) -> Result<()> {
        self.check_finite(id, field, value)?;
        if value.min_element() < 0.0 {
            return Err(RigError::NegativeSize {
                cube: self.describe(id),
                field,
                value: format_vec(value),
            });
        }
        Ok(())
    }

    /// World matrix of the frame a cube is positioned in
    ///
    /// This is the parent's cube frame, or the model root frame for root cubes.
    pub fn parent_world_matrix(&self, id: CubeId) -> Result<DMat4> {
        match self.get(id)?.parent {
            Some(parent) => Ok(self.get(parent)?.world_matrix),
            None => Ok(self.root_matrix),
        }
    }

    pub fn world_matrix(&self, id: CubeId) -> Result<DMat4> {
        Ok(self.get(id)?.world_matrix)
    }

    pub fn mesh_world_matrix(&self, id: CubeId) -> Result<DMat4> {
        Ok(self.get(id)?.mesh_world_matrix())
    }

    /// World position of the cube frame origin (the rotation point)
    pub fn world_position(&self, id: CubeId) -> Result<DVec3> {
        Ok(self.get(id)?.world_matrix.transform_point3(DVec3::ZERO))
    }

    /// World rotation of the cube frame
    pub fn world_rotation(&self, id: CubeId) -> Result<DQuat> {
        Ok(Decomposed::from_matrix(&self.get(id)?.world_matrix).rotation)
    }

    /// The eight box corners in world space, grow included
    pub fn world_corners(&self, id: CubeId) -> Result<[DVec3; 8]> {
        let cube = self.get(id)?;
        let mesh = cube.mesh_world_matrix();
        let min = -cube.local.cube_grow;
        let max = cube.local.dimension + cube.local.cube_grow;
        let mut corners = [DVec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let local = DVec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            *corner = mesh.transform_point3(local);
        }
        Ok(corners)
    }

    /// Recompute local and world matrices of a cube, optionally of its subtree
    pub fn force_update_world_matrix(&mut self, id: CubeId, recursive: bool) -> Result<()> {
        self.update_single(id)?;
        if recursive {
            let mut queue: VecDeque<CubeId> = self.get(id)?.children.iter().copied().collect();
            while let Some(current) = queue.pop_front() {
                self.update_single(current)?;
                queue.extend(self.get(current)?.children.iter().copied());
            }
        }
        Ok(())
    }

    /// Recompute every world matrix from the roots down
    pub fn update_world_matrices(&mut self) -> Result<()> {
        for root in self.roots.clone() {
            self.force_update_world_matrix(root, true)?;
        }
        Ok(())
    }

    fn update_single(&mut self, id: CubeId) -> Result<()> {
        let parent_world = self.parent_world_matrix(id)?;
        let cube = self.get_mut(id)?;
        cube.local_matrix = DMat4::from_rotation_translation(
            quat_from_euler_degrees(cube.local.rotation),
            cube.local.position,
        );
        cube.world_matrix = parent_world * cube.local_matrix;
        Ok(())
    }
}

fn validate_local(identifier: &str, local: &CubeLocalState) -> Result<()> {
    let vectors = [
        ("dimension", local.dimension),
        ("offset", local.offset),
        ("position", local.position),
        ("rotation", local.rotation),
        ("cube grow", local.cube_grow),
    ];
    for (field, value) in vectors {
        if !value.is_finite() {
            return Err(RigError::NonFinite {
                cube: identifier.to_string(),
                field,
                value: format_vec(value),
            });
        }
    }
    for (field, value) in [("dimension", local.dimension), ("cube grow", local.cube_grow)] {
        if value.min_element() < 0.0 {
            return Err(RigError::NegativeSize {
                cube: identifier.to_string(),
                field,
                value: format_vec(value),
            });
        }
    }
    Ok(())
}
