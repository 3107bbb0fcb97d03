//! Common types for the pose animation system

use glam::DVec3;

/// Trait for types that can be linearly interpolated
///
/// glam vectors carry an inherent `lerp` taking values, so call this trait
/// with `Lerp::lerp(&a, &b, t)` where both are in scope.
pub trait Lerp: Clone {
    /// Linear interpolation between self and other
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for DVec3 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        DVec3::lerp(*self, *other, t)
    }
}
