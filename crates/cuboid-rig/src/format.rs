//! JSON and YAML model files
//!
//! A model file is a tree of cube entries holding every local parameter plus
//! a `locked` flag. Loading seeds a [`LockedCubes`] from those flags; saving
//! takes them from the manager.

use std::fs;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::locked::LockedCubes;
use crate::model::{CubeDefinition, CubeId, CubeLocalState, Model, ModelConfig};

/// Serialization format of a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
}

impl ModelFormat {
    /// Pick the format from the file extension; anything but `.yaml`/`.yml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

fn default_units_per_block() -> f64 {
    ModelConfig::default().units_per_block
}

fn default_dimension() -> DVec3 {
    DVec3::ONE
}

/// Root of a model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default = "default_units_per_block")]
    pub units_per_block: f64,
    #[serde(default)]
    pub cubes: Vec<CubeEntry>,
}

/// One cube and its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeEntry {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_dimension")]
    pub dimension: DVec3,
    #[serde(default)]
    pub offset: DVec3,
    #[serde(default)]
    pub position: DVec3,
    #[serde(default)]
    pub rotation: DVec3,
    #[serde(default)]
    pub cube_grow: DVec3,
    #[serde(default)]
    pub texture_offset: [u32; 2],
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CubeEntry>,
}

impl CubeEntry {
    fn local(&self) -> CubeLocalState {
        CubeLocalState {
            dimension: self.dimension,
            offset: self.offset,
            position: self.position,
            rotation: self.rotation,
            cube_grow: self.cube_grow,
            texture_offset: self.texture_offset,
        }
    }

    fn from_cube(model: &Model, locked: &LockedCubes, id: CubeId) -> Result<Self> {
        let cube = model.get(id)?;
        let local = cube.local();
        let children = cube
            .children()
            .iter()
            .map(|&child| Self::from_cube(model, locked, child))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            identifier: cube.identifier().to_string(),
            name: cube.name().to_string(),
            dimension: local.dimension,
            offset: local.offset,
            position: local.position,
            rotation: local.rotation,
            cube_grow: local.cube_grow,
            texture_offset: local.texture_offset,
            locked: locked.is_locked(cube),
            children,
        })
    }

    fn insert_into(&self, model: &mut Model, locked: &mut LockedCubes, parent: Option<CubeId>) -> Result<()> {
        let definition = CubeDefinition {
            identifier: Some(self.identifier.clone()),
            name: self.name.clone(),
            local: self.local(),
        };
        let id = model.add_cube(parent, definition)?;
        if self.locked {
            locked.lock_identifier(self.identifier.clone());
        }
        for child in &self.children {
            child.insert_into(model, locked, Some(id))?;
        }
        Ok(())
    }
}

impl ModelFile {
    /// Snapshot a model, taking lock flags from `locked`
    pub fn from_model(model: &Model, locked: &LockedCubes) -> Result<Self> {
        let cubes = model
            .roots()
            .iter()
            .map(|&root| CubeEntry::from_cube(model, locked, root))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            units_per_block: model.units_per_block(),
            cubes,
        })
    }

    /// Build the model and its lock set
    pub fn build(&self) -> Result<(Model, LockedCubes)> {
        let mut model = Model::new(ModelConfig {
            units_per_block: self.units_per_block,
        })?;
        let mut locked = LockedCubes::new();
        for entry in &self.cubes {
            entry.insert_into(&mut model, &mut locked, None)?;
        }
        Ok((model, locked))
    }

    pub fn parse(text: &str, format: ModelFormat) -> Result<Self> {
        Ok(match format {
            ModelFormat::Json => serde_json::from_str(text)?,
            ModelFormat::Yaml => serde_yaml_ng::from_str(text)?,
        })
    }

    pub fn serialize(&self, format: ModelFormat) -> Result<String> {
        Ok(match format {
            ModelFormat::Json => serde_json::to_string_pretty(self)?,
            ModelFormat::Yaml => serde_yaml_ng::to_string(self)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, ModelFormat::from_path(path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.serialize(ModelFormat::from_path(path))?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Read a model file into a model and its lock set
pub fn load_model(path: &Path) -> Result<(Model, LockedCubes)> {
    ModelFile::load(path)?.build()
}

/// Write a model and its lock flags
pub fn save_model(path: &Path, model: &Model, locked: &LockedCubes) -> Result<()> {
    ModelFile::from_model(model, locked)?.save(path)
}
