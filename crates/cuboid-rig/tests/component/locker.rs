//! Locker capture and replay on a multi-level rig

use crate::common::{assert_state_close, humanoid, id};
use cuboid_rig::{CubeLocker, LockerType};
use glam::DVec3;
use test_case::test_case;

#[test_case(LockerType::PositionAndRotation ; "position and rotation")]
#[test_case(LockerType::Position ; "position")]
#[test_case(LockerType::Rotation ; "rotation")]
#[test_case(LockerType::Offset ; "offset")]
fn test_round_trip_leaves_every_cube_unchanged(kind: LockerType) {
    let mut model = humanoid();
    for cube in model.iter_by_level() {
        let before = model.local_state(cube).unwrap();
        let locker = CubeLocker::new(&model, cube, kind).unwrap();
        locker.reconstruct(&mut model).unwrap();
        assert_state_close(&model.local_state(cube).unwrap(), &before, 1e-9);
    }
}

#[test]
fn test_hand_keeps_world_matrix_when_arm_rotates() {
    let mut model = humanoid();
    let arm = id(&model, "arm_left");
    let hand = id(&model, "hand_left");
    let world = model.world_matrix(hand).unwrap();

    let locker = CubeLocker::new(&model, hand, LockerType::PositionAndRotation).unwrap();
    model.set_rotation(arm, DVec3::new(75.0, -30.0, 10.0)).unwrap();
    assert!(!model.world_matrix(hand).unwrap().abs_diff_eq(world, 1e-6));

    locker.reconstruct(&mut model).unwrap();
    assert!(model.world_matrix(hand).unwrap().abs_diff_eq(world, 1e-9));
}

#[test]
fn test_locker_survives_reparent() {
    let mut model = humanoid();
    let body = id(&model, "body");
    let hat = id(&model, "hat");
    let world = model.world_matrix(hat).unwrap();

    let locker = CubeLocker::new(&model, hat, LockerType::PositionAndRotation).unwrap();
    model.reparent(hat, Some(body)).unwrap();
    locker.reconstruct(&mut model).unwrap();

    assert_eq!(model.get(hat).unwrap().hierarchy_level(), 1);
    assert!(model.world_matrix(hat).unwrap().abs_diff_eq(world, 1e-9));
}
