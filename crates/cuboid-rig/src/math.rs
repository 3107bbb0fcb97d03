//! Matrix, quaternion and Euler helpers shared by the editing operations
//!
//! Rotations are stored on cubes as Euler angles in degrees with the fixed
//! intrinsic order Z-Y-X, so the rotation matrix is `Rz * Ry * Rx`. World
//! matrices are decomposed as translation, rotation, scale in that order.

use glam::{DMat4, DQuat, DVec3, EulerRot};

/// Unit X, Y and Z axes, in that order
pub const UNIT_AXES: [DVec3; 3] = [DVec3::X, DVec3::Y, DVec3::Z];

/// Build a rotation quaternion from Euler ZYX angles given in degrees
pub fn quat_from_euler_degrees(rotation: DVec3) -> DQuat {
    DQuat::from_euler(
        EulerRot::ZYX,
        rotation.z.to_radians(),
        rotation.y.to_radians(),
        rotation.x.to_radians(),
    )
}

/// Convert a rotation quaternion back to Euler ZYX angles in degrees
pub fn euler_degrees_from_quat(rotation: DQuat) -> DVec3 {
    let (z, y, x) = rotation.normalize().to_euler(EulerRot::ZYX);
    DVec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// A matrix split into its translation, rotation and scale parts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Decomposed {
    /// Decompose an affine matrix
    ///
    /// A negative determinant is folded into the X scale, leaving a proper
    /// rotation in `rotation`.
    pub fn from_matrix(matrix: &DMat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Rotation part as Euler ZYX degrees
    pub fn euler_degrees(&self) -> DVec3 {
        euler_degrees_from_quat(self.rotation)
    }
}

/// Reflect a point across the plane through `point` with normal `normal`
///
/// The normal does not need to be unit length but must not be zero; callers
/// validate it with [`validate_normal`] first.
pub fn mirror_point(v: DVec3, point: DVec3, normal: DVec3) -> DVec3 {
    let t = normal.dot(point - v) / normal.length_squared();
    v + normal * (2.0 * t)
}

/// Check that a mirror normal can be used as a plane direction
pub fn validate_normal(normal: DVec3) -> bool {
    normal.is_finite() && normal.length_squared() > f64::EPSILON
}

/// Snap an axis to its dominant cardinal direction
///
/// Components are compared by magnitude; ties go to X, then Y, then Z. The
/// sign of the dominant component is kept and the other two are zeroed.
pub fn align_axis(axis: DVec3) -> DVec3 {
    let abs = axis.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        DVec3::new(axis.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        DVec3::new(0.0, axis.y.signum(), 0.0)
    } else {
        DVec3::new(0.0, 0.0, axis.z.signum())
    }
}

/// Sign used by the invert operation: zero counts as negative
pub fn invert_sign(value: f64) -> f64 {
    if value > 0.0 { 1.0 } else { -1.0 }
}

/// Format a vector for error messages and logs
pub fn format_vec(v: DVec3) -> String {
    format!("[{}, {}, {}]", v.x, v.y, v.z)
}
