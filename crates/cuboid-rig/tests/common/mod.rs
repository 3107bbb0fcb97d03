//! Common test utilities and fixtures

#![allow(dead_code)]

use cuboid_rig::{CubeDefinition, CubeId, CubeLocalState, Model};
use glam::DVec3;

/// Tolerance for values that went through matrix decomposition
pub const EPSILON: f64 = 1e-9;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn close(a: DVec3, b: DVec3) -> bool {
    close_within(a, b, EPSILON)
}

pub fn close_within(a: DVec3, b: DVec3, epsilon: f64) -> bool {
    (a - b).abs().max_element() < epsilon
}

#[track_caller]
pub fn assert_close(actual: DVec3, expected: DVec3) {
    assert!(
        close(actual, expected),
        "expected {expected:?}, got {actual:?}"
    );
}

#[track_caller]
pub fn assert_state_close(actual: &CubeLocalState, expected: &CubeLocalState, epsilon: f64) {
    assert!(
        close_within(actual.position, expected.position, epsilon),
        "position: expected {:?}, got {:?}",
        expected.position,
        actual.position
    );
    assert!(
        close_within(actual.rotation, expected.rotation, epsilon),
        "rotation: expected {:?}, got {:?}",
        expected.rotation,
        actual.rotation
    );
    assert!(
        close_within(actual.offset, expected.offset, epsilon),
        "offset: expected {:?}, got {:?}",
        expected.offset,
        actual.offset
    );
    assert_eq!(actual.dimension, expected.dimension);
}

pub fn cube(identifier: &str) -> CubeDefinition {
    CubeDefinition::new(identifier).with_identifier(identifier)
}

/// `a -> b -> c`, each child 16 units above its parent
pub fn chain() -> (Model, CubeId, CubeId, CubeId) {
    let mut model = Model::default();
    let a = model.add_cube(None, cube("a")).unwrap();
    let b = model
        .add_cube(Some(a), cube("b").with_position(DVec3::new(0.0, 16.0, 0.0)))
        .unwrap();
    let c = model
        .add_cube(Some(b), cube("c").with_position(DVec3::new(0.0, 16.0, 0.0)))
        .unwrap();
    (model, a, b, c)
}

/// The two-cube rig used to describe lock behavior:
/// `A` dimension 16, `B` dimension 8 with offset `[0, 8, 0]` at `[0, 16, 0]`
pub fn example_rig() -> (Model, CubeId, CubeId) {
    let mut model = Model::default();
    let a = model
        .add_cube(None, cube("A").with_dimension(DVec3::splat(16.0)))
        .unwrap();
    let b = model
        .add_cube(
            Some(a),
            cube("B")
                .with_dimension(DVec3::splat(8.0))
                .with_offset(DVec3::new(0.0, 8.0, 0.0))
                .with_position(DVec3::new(0.0, 16.0, 0.0)),
        )
        .unwrap();
    (model, a, b)
}

/// A small humanoid with rotated joints at several levels
///
/// ```text
/// body
/// ├── head
/// │   └── hat
/// ├── arm_left
/// │   └── hand_left
/// └── arm_right
/// ```
pub fn humanoid() -> Model {
    let mut model = Model::default();
    let body = model
        .add_cube(
            None,
            cube("body")
                .with_dimension(DVec3::new(8.0, 12.0, 4.0))
                .with_offset(DVec3::new(-4.0, 0.0, -2.0))
                .with_position(DVec3::new(0.0, 12.0, 0.0))
                .with_rotation(DVec3::new(0.0, 10.0, 0.0)),
        )
        .unwrap();
    let head = model
        .add_cube(
            Some(body),
            cube("head")
                .with_dimension(DVec3::splat(8.0))
                .with_offset(DVec3::new(-4.0, 0.0, -4.0))
                .with_position(DVec3::new(0.0, 12.0, 0.0))
                .with_rotation(DVec3::new(-12.0, 25.0, 5.0)),
        )
        .unwrap();
    model
        .add_cube(
            Some(head),
            cube("hat")
                .with_dimension(DVec3::new(10.0, 2.0, 10.0))
                .with_offset(DVec3::new(-5.0, 0.0, -5.0))
                .with_position(DVec3::new(0.0, 8.0, 0.0))
                .with_rotation(DVec3::new(0.0, 0.0, 15.0)),
        )
        .unwrap();
    let arm_left = model
        .add_cube(
            Some(body),
            cube("arm_left")
                .with_dimension(DVec3::new(4.0, 12.0, 4.0))
                .with_offset(DVec3::new(0.0, -10.0, -2.0))
                .with_position(DVec3::new(4.0, 10.0, 0.0))
                .with_rotation(DVec3::new(30.0, 0.0, -20.0)),
        )
        .unwrap();
    model
        .add_cube(
            Some(arm_left),
            cube("hand_left")
                .with_dimension(DVec3::new(3.0, 3.0, 3.0))
                .with_offset(DVec3::new(0.0, -3.0, -1.5))
                .with_position(DVec3::new(2.0, -10.0, 0.0))
                .with_rotation(DVec3::new(-40.0, 15.0, 0.0)),
        )
        .unwrap();
    model
        .add_cube(
            Some(body),
            cube("arm_right")
                .with_dimension(DVec3::new(4.0, 12.0, 4.0))
                .with_offset(DVec3::new(-4.0, -10.0, -2.0))
                .with_position(DVec3::new(-4.0, 10.0, 0.0))
                .with_rotation(DVec3::new(-30.0, 5.0, 20.0)),
        )
        .unwrap();
    model
}

pub fn id(model: &Model, identifier: &str) -> CubeId {
    model
        .find_by_identifier(identifier)
        .unwrap_or_else(|| panic!("fixture has no cube '{identifier}'"))
}

/// Local state of every cube, keyed by identifier
pub fn states(model: &Model) -> Vec<(String, CubeLocalState)> {
    model
        .iter_by_level()
        .into_iter()
        .map(|id| {
            let cube = model.get(id).unwrap();
            (cube.identifier().to_string(), *cube.local())
        })
        .collect()
}
