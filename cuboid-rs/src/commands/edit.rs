//! Mirror and invert commands

use anyhow::{Context, Result};
use cuboid_rig::invert::invert_selection;
use cuboid_rig::mirror;
use glam::DVec3;

use crate::cli::{CubeArgs, EditTarget};
use crate::utils::{format_vec3, load, save, select};

pub fn handle_mirror(
    target: &EditTarget,
    cubes: &CubeArgs,
    point: DVec3,
    normal: DVec3,
) -> Result<()> {
    let (mut model, mut locked) = load(&target.file)?;
    let selection = select(&model, &cubes.cubes)?;

    let operation = locked
        .edit_preserving_locks(&mut model, &selection, |model| {
            mirror(model, &selection, point, normal)
        })
        .context("Mirror failed")?;

    save(target.output_path(), &model, &locked)?;
    println!(
        "Mirrored {} cube(s) across the plane through {} with normal {}",
        operation.entries().iter().filter(|e| e.mirrored).count(),
        format_vec3(point),
        format_vec3(normal)
    );
    Ok(())
}

pub fn handle_invert(target: &EditTarget, cubes: &CubeArgs) -> Result<()> {
    let (mut model, mut locked) = load(&target.file)?;
    let selection = select(&model, &cubes.cubes)?;

    let inverted = locked
        .edit_preserving_locks(&mut model, &selection, |model| {
            invert_selection(model, &selection)
        })
        .context("Invert failed")?;

    save(target.output_path(), &model, &locked)?;
    println!("Inverted {} cube(s)", inverted.len());
    Ok(())
}
