//! Translate, rotate and resize commands
//!
//! Each command runs one complete gesture: press, a single update with the
//! full amount, release. Locked cubes keep their world pose throughout.

use anyhow::{Context, Result};
use cuboid_rig::{
    Gumball, GumballConfig, GumballMode, RotationAnchor, TransformSpace, TranslateTarget,
};
use glam::DVec3;
use log::debug;

use crate::cli::{CubeArgs, EditTarget};
use crate::utils::{load, save, select};

fn run_gesture(
    target: &EditTarget,
    cubes: &CubeArgs,
    config: GumballConfig,
    axis: DVec3,
    amount: f64,
) -> Result<usize> {
    let (mut model, mut locked) = load(&target.file)?;
    let selection = select(&model, &cubes.cubes)?;
    debug!(
        "{:?} gesture on {} cube(s), axis {axis}, amount {amount}",
        config.mode,
        selection.len()
    );

    let mut gumball = Gumball::new(config);
    gumball
        .mouse_down(&model, &selection, &mut locked)
        .context("Failed to start gesture")?;
    if let Err(e) = gumball.update(&mut model, &locked, axis, amount) {
        gumball.cancel(&mut model, &mut locked)?;
        return Err(e).context("Gesture update failed");
    }
    gumball.mouse_up(&mut locked)?;

    save(target.output_path(), &model, &locked)?;
    Ok(selection.len())
}

pub fn handle_translate(
    target: &EditTarget,
    cubes: &CubeArgs,
    axis: DVec3,
    length: f64,
    translate_target: TranslateTarget,
    space: TransformSpace,
    all_cubes: bool,
) -> Result<()> {
    let config = GumballConfig {
        mode: GumballMode::Translate,
        space,
        move_as_root_only: !all_cubes,
        translate_target,
        ..GumballConfig::default()
    };
    let count = run_gesture(target, cubes, config, axis, length)?;
    println!("Translated {count} cube(s) by {length} block(s)");
    Ok(())
}

pub fn handle_rotate(
    target: &EditTarget,
    cubes: &CubeArgs,
    axis: DVec3,
    angle: f64,
    around_point: Option<DVec3>,
    space: TransformSpace,
) -> Result<()> {
    let config = GumballConfig {
        mode: GumballMode::Rotate,
        space,
        rotation_anchor: around_point.map_or(RotationAnchor::CubeOrigin, RotationAnchor::Point),
        ..GumballConfig::default()
    };
    let count = run_gesture(target, cubes, config, axis, angle)?;
    println!("Rotated {count} cube(s) by {angle} degree(s)");
    Ok(())
}

pub fn handle_resize(
    target: &EditTarget,
    cubes: &CubeArgs,
    axis: DVec3,
    length: f64,
    space: TransformSpace,
) -> Result<()> {
    let config = GumballConfig {
        mode: GumballMode::Dimensions,
        space,
        ..GumballConfig::default()
    };
    let count = run_gesture(target, cubes, config, axis, length)?;
    println!("Resized {count} cube(s)");
    Ok(())
}
