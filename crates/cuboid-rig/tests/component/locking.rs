//! Lock caches around edits

use crate::common::{assert_close, chain, humanoid, id, init_logging};
use cuboid_rig::{LockedCubes, Selection};
use glam::DVec3;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case(DVec3::new(10.0, 0.0, 0.0) ; "along x")]
#[test_case(DVec3::new(-3.5, 7.25, 2.0) ; "diagonal")]
#[test_case(DVec3::ZERO ; "no move")]
fn test_locked_middle_cube_keeps_world_position(delta: DVec3) {
    init_logging();
    let (mut model, a, b, c) = chain();
    let mut locked = LockedCubes::from_identifiers(["b"]);
    let b_world = model.world_position(b).unwrap();
    let c_world = model.world_position(c).unwrap();

    locked
        .edit_preserving_locks(&mut model, &Selection::from_ids([a]), |model| {
            model.set_position(a, delta)
        })
        .unwrap();

    assert_eq!(model.get(a).unwrap().position(), delta);
    assert_close(model.world_position(b).unwrap(), b_world);
    // c is not locked, so it follows a
    assert_close(model.world_position(c).unwrap(), c_world + delta / 16.0);
}

#[test]
fn test_locked_cube_keeps_orientation_when_parent_rotates() {
    let mut model = humanoid();
    let body = id(&model, "body");
    let head = id(&model, "head");
    let hat = id(&model, "hat");
    let mut locked = LockedCubes::from_identifiers(["head"]);
    let head_world = model.world_matrix(head).unwrap();
    let rotation = DVec3::new(20.0, -45.0, 10.0);

    let mut unlocked = model.clone();
    unlocked.set_rotation(body, rotation).unwrap();
    let hat_expected = unlocked.world_matrix(hat).unwrap();

    locked
        .edit_preserving_locks(&mut model, &Selection::from_ids([body]), |model| {
            model.set_rotation(body, rotation)
        })
        .unwrap();

    assert!(model.world_matrix(head).unwrap().abs_diff_eq(head_world, 1e-9));
    // the hat is not locked and follows the body as if the head had moved
    assert!(model.world_matrix(hat).unwrap().abs_diff_eq(hat_expected, 1e-9));
}

#[test]
fn test_directly_moved_locked_cube_moves() {
    let (mut model, _, b, _) = chain();
    let mut locked = LockedCubes::from_identifiers(["b"]);

    locked
        .edit_preserving_locks(&mut model, &Selection::from_ids([b]), |model| {
            model.set_position(b, DVec3::new(4.0, 16.0, 0.0))
        })
        .unwrap();

    assert_eq!(model.get(b).unwrap().position(), DVec3::new(4.0, 16.0, 0.0));
}

#[test]
fn test_deleted_locked_cube_is_skipped() {
    let (mut model, a, _, c) = chain();
    let mut locked = LockedCubes::from_identifiers(["c"]);
    model.remove_cube(c).unwrap();

    locked
        .edit_preserving_locks(&mut model, &Selection::from_ids([a]), |model| {
            model.set_position(a, DVec3::X)
        })
        .unwrap();

    assert!(locked.is_identifier_locked("c"));
    assert!(locked.locked_children_cache().is_empty());
}

#[test]
fn test_lock_survives_recreating_cube() {
    let (mut model, a, b, _) = chain();
    let mut locked = LockedCubes::new();
    locked.lock(model.get(b).unwrap());

    // undo/redo style: remove and add back with the same identifier
    let state = model.local_state(b).unwrap();
    model.remove_cube(b).unwrap();
    let recreated = model
        .add_cube(
            Some(a),
            cuboid_rig::CubeDefinition {
                identifier: Some("b".to_string()),
                name: "b".to_string(),
                local: state,
            },
        )
        .unwrap();
    let world = model.world_position(recreated).unwrap();

    locked
        .edit_preserving_locks(&mut model, &Selection::from_ids([a]), |model| {
            model.set_position(a, DVec3::new(0.0, 0.0, 32.0))
        })
        .unwrap();

    assert!(locked.is_locked(model.get(recreated).unwrap()));
    assert_close(model.world_position(recreated).unwrap(), world);
}
