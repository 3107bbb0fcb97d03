//! Multi-step editing sessions on locked rigs

use crate::common::{assert_close, example_rig, humanoid, id, init_logging, states};
use cuboid_rig::invert::invert_all;
use cuboid_rig::{
    Gumball, GumballConfig, GumballMode, LockedCubes, Selection, TranslateTarget, mirror,
};
use glam::DVec3;
use pretty_assertions::assert_eq;

#[test]
fn test_locked_child_example() {
    init_logging();
    let (mut model, a, b) = example_rig();
    let mut locked = LockedCubes::new();
    locked.lock(model.get(b).unwrap());
    let b_world = model.world_position(b).unwrap();
    let selection = Selection::from_ids([a]);

    locked.create_locked_cubes_cache(&model, &selection, false).unwrap();
    model.set_position(a, DVec3::new(10.0, 0.0, 0.0)).unwrap();
    locked.reconstruct_locked_cubes(&mut model, true).unwrap();
    locked.clear_cache();

    assert_eq!(model.get(a).unwrap().position(), DVec3::new(10.0, 0.0, 0.0));
    assert_close(model.world_position(b).unwrap(), b_world);
    assert_close(model.get(b).unwrap().position(), DVec3::new(-10.0, 16.0, 0.0));
    assert_eq!(model.get(b).unwrap().offset(), DVec3::new(0.0, 8.0, 0.0));
}

#[test]
fn test_session_with_every_operation() {
    init_logging();
    let mut model = humanoid();
    let body = id(&model, "body");
    let head = id(&model, "head");
    let arm_left = id(&model, "arm_left");
    let mut locked = LockedCubes::from_identifiers(["head"]);
    let head_world = model.world_matrix(head).unwrap();

    let selection = Selection::from_ids([body]);
    let mut gumball = Gumball::default();

    // drag the body up half a block
    gumball.mouse_down(&model, &selection, &mut locked).unwrap();
    gumball.update(&mut model, &locked, DVec3::Y, 0.5).unwrap();
    gumball.mouse_up(&mut locked).unwrap();

    // spin it a quarter turn
    gumball
        .set_config(GumballConfig {
            mode: GumballMode::Rotate,
            ..GumballConfig::default()
        })
        .unwrap();
    gumball.mouse_down(&model, &selection, &mut locked).unwrap();
    gumball.update(&mut model, &locked, DVec3::Y, 90.0).unwrap();
    gumball.mouse_up(&mut locked).unwrap();

    // move the arm pivot without moving the arm
    let arm_corners = model.world_corners(arm_left).unwrap();
    gumball
        .set_config(GumballConfig {
            translate_target: TranslateTarget::RotationPoint,
            ..GumballConfig::default()
        })
        .unwrap();
    gumball
        .mouse_down(&model, &Selection::from_ids([arm_left]), &mut locked)
        .unwrap();
    gumball.update(&mut model, &locked, DVec3::Z, 0.25).unwrap();
    gumball.mouse_up(&mut locked).unwrap();
    for (before, after) in arm_corners.iter().zip(model.world_corners(arm_left).unwrap()) {
        assert_close(after, *before);
    }

    assert!(model.world_matrix(head).unwrap().abs_diff_eq(head_world, 1e-9));
    assert_eq!(locked.identifiers().collect::<Vec<_>>(), vec!["head"]);

    // mirror and invert twice each, the session state comes back
    let before = states(&model);
    mirror(&mut model, &selection, DVec3::ZERO, DVec3::X).unwrap();
    mirror(&mut model, &selection, DVec3::ZERO, DVec3::X).unwrap();
    invert_all(&mut model).unwrap();
    invert_all(&mut model).unwrap();
    for ((identifier, actual), (_, expected)) in states(&model).iter().zip(&before) {
        assert!(
            (actual.position - expected.position).length() < 1e-6,
            "{identifier} moved"
        );
    }
}
