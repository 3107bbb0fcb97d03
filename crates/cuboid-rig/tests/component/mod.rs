//! Level 2: Component Integration Tests
//!
//! Lockers and lock caches working against a real hierarchy.

pub mod locker;
pub mod locking;
pub mod ordering;
