//! Model file I/O and argument parsing

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use cuboid_rig::format::{load_model, save_model};
use cuboid_rig::{LockedCubes, Model, Selection};
use glam::DVec3;
use log::info;

/// Parse `X,Y,Z` into a vector
pub fn parse_vec3(value: &str) -> std::result::Result<DVec3, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z but got '{value}'"));
    };
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| format!("invalid number '{s}': {e}"))
            .and_then(|v| {
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(format!("'{s}' is not a finite number"))
                }
            })
    };
    Ok(DVec3::new(parse(x)?, parse(y)?, parse(z)?))
}

/// Load a model file with its lock flags
pub fn load(path: &Path) -> Result<(Model, LockedCubes)> {
    let (model, locked) =
        load_model(path).with_context(|| format!("Failed to load model from {}", path.display()))?;
    info!(
        "Loaded {} cubes ({} locked) from {}",
        model.len(),
        locked.len(),
        path.display()
    );
    Ok((model, locked))
}

/// Write a model file with its lock flags
pub fn save(path: &Path, model: &Model, locked: &LockedCubes) -> Result<()> {
    save_model(path, model, locked)
        .with_context(|| format!("Failed to save model to {}", path.display()))?;
    info!("Saved {} cubes to {}", model.len(), path.display());
    Ok(())
}

/// Resolve identifiers to a selection; an empty list selects every cube
pub fn select(model: &Model, identifiers: &[String]) -> Result<Selection> {
    if identifiers.is_empty() {
        return Ok(Selection::from_ids(model.iter_by_level()));
    }
    let ids = identifiers
        .iter()
        .map(|identifier| {
            model
                .find_by_identifier(identifier)
                .ok_or_else(|| anyhow!("No cube with identifier '{identifier}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Selection::from_ids(ids))
}

/// Format a vector compactly for display
pub fn format_vec3(v: DVec3) -> String {
    format!("[{}, {}, {}]", trim(v.x), trim(v.y), trim(v.z))
}

fn trim(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
