//! Inspecting model files and managing locks

use std::path::Path;

use anyhow::{Result, bail};
use cuboid_rig::{CubeId, LockedCubes, Model};

use crate::cli::EditTarget;
use crate::utils::{
    NodeType, TreeNode, TreeOptions, add_table_row, create_table, format_vec3, load, render_tree,
    save,
};

pub fn handle_info(path: &Path) -> Result<()> {
    let (model, locked) = load(path)?;

    println!("Model: {}", path.display());
    println!("Units per block: {}", model.units_per_block());
    println!("Cubes: {}", model.len());
    println!("Root cubes: {}", model.roots().len());
    if let Some(max_level) = model.max_level() {
        println!("Hierarchy depth: {}", max_level + 1);
    }
    println!("Locked cubes: {}", locked.len());

    if model.is_empty() {
        return Ok(());
    }

    let mut table = create_table(&[
        "Identifier",
        "Name",
        "Level",
        "Position",
        "Rotation",
        "Dimension",
        "Locked",
    ]);
    for id in model.iter_by_level() {
        let cube = model.get(id)?;
        add_table_row(
            &mut table,
            &[
                cube.identifier().to_string(),
                cube.name().to_string(),
                cube.hierarchy_level().to_string(),
                format_vec3(cube.position()),
                format_vec3(cube.rotation()),
                format_vec3(cube.dimension()),
                if locked.is_locked(cube) { "yes" } else { "" }.to_string(),
            ],
        );
    }
    println!();
    table.printstd();
    Ok(())
}

pub fn handle_tree(path: &Path, depth: Option<usize>, no_color: bool, details: bool) -> Result<()> {
    let (model, locked) = load(path)?;

    let mut root = TreeNode::new(path.display().to_string(), NodeType::Model)
        .with_metadata("cubes", model.len().to_string())
        .with_metadata("units per block", model.units_per_block().to_string());
    for &id in model.roots() {
        root = root.add_child(cube_node(&model, &locked, id, details)?);
    }

    let options = TreeOptions {
        max_depth: depth,
        no_color,
        show_metadata: details,
    };
    print!("{}", render_tree(&root, &options));
    Ok(())
}

fn cube_node(model: &Model, locked: &LockedCubes, id: CubeId, details: bool) -> Result<TreeNode> {
    let cube = model.get(id)?;
    let node_type = if locked.is_locked(cube) {
        NodeType::LockedCube
    } else {
        NodeType::Cube
    };
    let label = if cube.name().is_empty() || cube.name() == cube.identifier() {
        cube.identifier().to_string()
    } else {
        format!("{} ({})", cube.name(), cube.identifier())
    };

    let mut node = TreeNode::new(label, node_type);
    if details {
        node = node
            .with_metadata("position", format_vec3(cube.position()))
            .with_metadata("rotation", format_vec3(cube.rotation()))
            .with_metadata("offset", format_vec3(cube.offset()))
            .with_metadata("dimension", format_vec3(cube.dimension()))
            .with_metadata("world", format_vec3(model.world_position(id)?));
    }
    for &child in cube.children() {
        node = node.add_child(cube_node(model, locked, child, details)?);
    }
    Ok(node)
}

pub fn handle_lock(target: &EditTarget, ids: &[String], unlock: bool) -> Result<()> {
    let (model, mut locked) = load(&target.file)?;

    let missing: Vec<&str> = ids
        .iter()
        .filter(|id| model.find_by_identifier(id).is_none())
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        bail!("No cube with identifier: {}", missing.join(", "));
    }

    for id in ids {
        if unlock {
            locked.unlock_identifier(id);
        } else {
            locked.lock_identifier(id.clone());
        }
    }

    save(target.output_path(), &model, &locked)?;
    println!(
        "{} {} cube(s); {} locked in total",
        if unlock { "Unlocked" } else { "Locked" },
        ids.len(),
        locked.len()
    );
    Ok(())
}
