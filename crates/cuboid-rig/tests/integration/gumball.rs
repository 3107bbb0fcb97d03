//! Gumball gestures with locked cubes

use crate::common::{assert_close, chain, example_rig, humanoid, id};
use cuboid_rig::{
    Gumball, GumballConfig, GumballMode, LockedCubes, RigError, RotationAnchor, Selection,
    TransformSpace,
};
use glam::DVec3;
use pretty_assertions::assert_eq;

#[test]
fn test_translate_gesture_keeps_locked_child() {
    let (mut model, a, b) = example_rig();
    let mut locked = LockedCubes::from_identifiers(["B"]);
    let b_world = model.world_position(b).unwrap();

    let mut gumball = Gumball::default();
    gumball
        .mouse_down(&model, &Selection::from_ids([a]), &mut locked)
        .unwrap();
    for step in [0.25, 0.5, 10.0 / 16.0] {
        gumball.translate(&mut model, &locked, DVec3::X, step).unwrap();
        assert_close(model.world_position(b).unwrap(), b_world);
    }
    gumball.mouse_up(&mut locked).unwrap();

    assert_eq!(model.get(a).unwrap().position(), DVec3::new(10.0, 0.0, 0.0));
    assert_close(model.get(b).unwrap().position(), DVec3::new(-10.0, 16.0, 0.0));
    assert!(locked.locked_children_cache().is_empty());
}

#[test]
fn test_rotate_gesture_child_of_locked_follows_root() {
    let (mut model, a, b, c) = chain();
    let mut locked = LockedCubes::from_identifiers(["b"]);
    let b_world = model.world_matrix(b).unwrap();
    let rotation = DVec3::new(0.0, 0.0, 90.0);

    let mut unlocked = model.clone();
    unlocked.set_rotation(a, rotation).unwrap();
    let c_expected = unlocked.world_position(c).unwrap();

    let mut gumball = Gumball::new(GumballConfig {
        mode: GumballMode::Rotate,
        ..GumballConfig::default()
    });
    gumball
        .mouse_down(&model, &Selection::from_ids([a]), &mut locked)
        .unwrap();
    gumball.update(&mut model, &locked, DVec3::Z, 90.0).unwrap();
    gumball.mouse_up(&mut locked).unwrap();

    assert_close(model.get(a).unwrap().rotation(), rotation);
    assert!(model.world_matrix(b).unwrap().abs_diff_eq(b_world, 1e-9));
    assert_close(model.world_position(c).unwrap(), c_expected);
}

#[test]
fn test_local_space_rotation_of_nested_cube() {
    let mut model = humanoid();
    let arm = id(&model, "arm_left");
    let axis_world = model.world_rotation(arm).unwrap() * DVec3::X;
    let hand = id(&model, "hand_left");
    let hand_world = model.world_position(hand).unwrap();

    let mut locked = LockedCubes::new();
    let mut gumball = Gumball::new(GumballConfig {
        mode: GumballMode::Rotate,
        space: TransformSpace::Local,
        ..GumballConfig::default()
    });
    gumball
        .mouse_down(&model, &Selection::from_ids([arm]), &mut locked)
        .unwrap();
    gumball.update(&mut model, &locked, DVec3::X, 35.0).unwrap();
    gumball.mouse_up(&mut locked).unwrap();

    // rotating about the arm's own X axis leaves that axis in place
    assert_close(model.world_rotation(arm).unwrap() * DVec3::X, axis_world);
    assert!((model.world_position(hand).unwrap() - hand_world).length() > 1e-3);
}

#[test]
fn test_rotate_around_point_orbits_selection() {
    let (mut model, a, _, _) = chain();
    model.set_position(a, DVec3::new(32.0, 0.0, 0.0)).unwrap();
    let mut locked = LockedCubes::new();
    let mut gumball = Gumball::new(GumballConfig {
        mode: GumballMode::Rotate,
        rotation_anchor: RotationAnchor::Point(DVec3::new(1.0, 0.0, 0.0)),
        ..GumballConfig::default()
    });
    gumball
        .mouse_down(&model, &Selection::from_ids([a]), &mut locked)
        .unwrap();
    gumball.update(&mut model, &locked, DVec3::Y, 180.0).unwrap();
    gumball.mouse_up(&mut locked).unwrap();

    assert_close(model.world_position(a).unwrap(), DVec3::ZERO);
}

#[test]
fn test_gesture_errors() {
    let (mut model, a, _, _) = chain();
    let mut locked = LockedCubes::new();
    let mut gumball = Gumball::default();

    assert!(matches!(
        gumball.mouse_up(&mut locked),
        Err(RigError::NoActiveGesture)
    ));
    assert!(matches!(
        gumball.translate(&mut model, &locked, DVec3::X, 1.0),
        Err(RigError::NoActiveGesture)
    ));

    gumball
        .mouse_down(&model, &Selection::from_ids([a]), &mut locked)
        .unwrap();
    assert!(matches!(
        gumball.mouse_down(&model, &Selection::from_ids([a]), &mut locked),
        Err(RigError::GestureInProgress)
    ));
}
