//! Mirroring rigs across arbitrary planes

use crate::common::{assert_close, assert_state_close, close_within, cube, humanoid, id, states};
use cuboid_rig::{MirrorOperation, MirrorPlane, Model, RigError, Selection, mirror};
use glam::DVec3;

fn plane() -> (DVec3, DVec3) {
    (DVec3::new(0.3, 0.2, -0.1), DVec3::new(1.0, 1.0, 0.5))
}

#[test]
fn test_mirror_twice_restores_rig() {
    let mut model = humanoid();
    let original = states(&model);
    let selection = Selection::from_ids([
        id(&model, "body"),
        id(&model, "head"),
        id(&model, "arm_left"),
    ]);
    let (point, normal) = plane();

    mirror(&mut model, &selection, point, normal).unwrap();
    mirror(&mut model, &selection, point, normal).unwrap();

    for ((identifier, actual), (_, expected)) in states(&model).iter().zip(&original) {
        println!("checking {identifier}");
        assert_state_close(actual, expected, 1e-6);
    }
}

#[test]
fn test_mirrored_box_covers_reflected_volume() {
    let mut model = humanoid();
    let head = id(&model, "head");
    let (point, normal) = plane();
    let plane = MirrorPlane::new(point, normal).unwrap();
    let expected: Vec<DVec3> = model
        .world_corners(head)
        .unwrap()
        .iter()
        .map(|corner| plane.mirror_point(*corner))
        .collect();

    mirror(&mut model, &Selection::from_ids([head]), point, normal).unwrap();

    for corner in model.world_corners(head).unwrap() {
        assert!(
            expected.iter().any(|e| close_within(*e, corner, 1e-9)),
            "corner {corner:?} is not a reflected corner"
        );
    }
}

#[test]
fn test_unselected_children_stay_in_place() {
    let mut model = humanoid();
    let body = id(&model, "body");
    let hat = id(&model, "hat");
    let arm_right = id(&model, "arm_right");
    let head = id(&model, "head");
    let head_world = model.world_matrix(head).unwrap();
    let arm_world = model.world_matrix(arm_right).unwrap();
    let hat_world = model.world_matrix(hat).unwrap();

    let operation = mirror(&mut model, &Selection::from_ids([body]), DVec3::ZERO, DVec3::X).unwrap();

    assert!(model.world_matrix(head).unwrap().abs_diff_eq(head_world, 1e-9));
    assert!(model.world_matrix(arm_right).unwrap().abs_diff_eq(arm_world, 1e-9));
    assert!(model.world_matrix(hat).unwrap().abs_diff_eq(hat_world, 1e-9));
    assert!(operation.entry(head).is_some_and(|e| !e.mirrored));
    assert!(operation.entry(hat).is_none());
}

#[test]
fn test_preview_and_exit() {
    let mut model = humanoid();
    let original = states(&model);
    let arm = id(&model, "arm_left");
    let arm_world = model.world_position(arm).unwrap();
    let (point, normal) = plane();
    let operation = MirrorOperation::prepare(
        &mut model,
        &Selection::from_ids([arm]),
        MirrorPlane::new(point, normal).unwrap(),
    )
    .unwrap();
    assert_eq!(states(&model), original);

    for _ in 0..3 {
        operation.apply(&mut model).unwrap();
        assert_close(
            model.world_position(arm).unwrap(),
            operation.plane().mirror_point(arm_world),
        );
        operation.on_exit(&mut model).unwrap();
        assert_eq!(states(&model), original);
    }
}

#[test]
fn test_invalid_axis() {
    let mut model = humanoid();
    let selection = Selection::from_ids([id(&model, "body")]);
    let original = states(&model);
    let result = mirror(&mut model, &selection, DVec3::ZERO, DVec3::ZERO);
    assert!(matches!(result, Err(RigError::InvalidMirrorAxis(_))));
    assert_eq!(states(&model), original);
}

#[test]
fn test_mirror_twice_at_gimbal_lock_keeps_pose() {
    let mut model = Model::default();
    let block = model
        .add_cube(
            None,
            cube("block")
                .with_dimension(DVec3::new(4.0, 6.0, 8.0))
                .with_offset(DVec3::new(1.0, 2.0, 3.0))
                .with_position(DVec3::new(5.0, -3.0, 2.0))
                .with_rotation(DVec3::new(20.0, 90.0, 10.0)),
        )
        .unwrap();
    let world = model.world_matrix(block).unwrap();
    let corners = model.world_corners(block).unwrap();
    let selection = Selection::from_ids([block]);
    let (point, normal) = plane();

    mirror(&mut model, &selection, point, normal).unwrap();
    mirror(&mut model, &selection, point, normal).unwrap();

    // Euler angles may come back in another form; the pose may not
    assert!(model.world_matrix(block).unwrap().abs_diff_eq(world, 1e-6));
    for (before, after) in corners.iter().zip(model.world_corners(block).unwrap()) {
        assert!(close_within(*before, after, 1e-6), "{before:?} != {after:?}");
    }
}
