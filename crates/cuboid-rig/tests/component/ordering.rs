//! Lockers must be replayed parents first

use crate::common::{chain, close};
use cuboid_rig::{LockerCache, LockerType};
use glam::DVec3;

#[test]
fn test_descending_replay_differs_from_ascending() {
    let (mut model, a, b, c) = chain();
    let mut cache = LockerCache::new();
    cache.add(&model, b, LockerType::PositionAndRotation).unwrap();
    cache.add(&model, c, LockerType::PositionAndRotation).unwrap();
    let b_world = model.world_position(b).unwrap();
    let c_world = model.world_position(c).unwrap();
    let moved = DVec3::new(16.0, 0.0, 0.0);

    // Ascending: every cube lands on its captured pose
    let mut ascending = model.clone();
    ascending.set_position(a, moved).unwrap();
    for level in cache.levels() {
        for locker in cache.at_level(level) {
            locker.reconstruct(&mut ascending).unwrap();
        }
    }
    assert!(close(ascending.world_position(b).unwrap(), b_world));
    assert!(close(ascending.world_position(c).unwrap(), c_world));

    // Descending: c is fixed against a parent that is then moved back
    model.set_position(a, moved).unwrap();
    let levels: Vec<usize> = cache.levels().collect();
    for level in levels.into_iter().rev() {
        for locker in cache.at_level(level) {
            locker.reconstruct(&mut model).unwrap();
        }
    }
    assert!(close(model.world_position(b).unwrap(), b_world));
    assert!(!close(model.world_position(c).unwrap(), c_world));
}

#[test]
fn test_reconstruct_all_uses_ascending_order() {
    let (mut model, a, b, c) = chain();
    let mut cache = LockerCache::new();
    // inserted child first on purpose
    cache.add(&model, c, LockerType::PositionAndRotation).unwrap();
    cache.add(&model, b, LockerType::PositionAndRotation).unwrap();
    let c_world = model.world_position(c).unwrap();

    model.set_rotation(a, DVec3::new(0.0, 90.0, 0.0)).unwrap();
    cache.reconstruct_all(&mut model).unwrap();
    assert!(close(model.world_position(c).unwrap(), c_world));
}
