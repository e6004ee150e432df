//! # Object Transforms
//!
//! Location / rotation / scale triple stored on every scene object, and its
//! conversion to and from affine matrices.
//!
//! Rotation is an XYZ Euler triple in radians: X is applied first, then Y,
//! then Z, matching the host's `rotation_euler` convention.

use config::constants::{approx_equal, approx_zero};
use glam::{DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Decomposed object transform.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use paragen_scene::Transform;
///
/// let t = Transform::from_position(DVec3::new(1.0, 2.0, 3.0));
/// let p = t.to_matrix().transform_point3(DVec3::ZERO);
/// assert_eq!(p, DVec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation.
    pub position: DVec3,
    /// Euler XYZ angles in radians.
    pub rotation: DVec3,
    /// Per-axis scale factors.
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scale: DVec3::ONE,
    };

    /// Identity transform moved to `position`.
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rotation as a quaternion.
    pub fn quaternion(&self) -> DQuat {
        DQuat::from_euler(EulerRot::ZYX, self.rotation.z, self.rotation.y, self.rotation.x)
    }

    /// Composes translation * rotation * scale.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    /// Decomposes an affine matrix.
    ///
    /// Shear is not representable and is dropped. Components within float
    /// noise of zero (or of one, for scale) are snapped.
    pub fn from_matrix(matrix: &DMat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
        Self {
            position: DVec3::new(snap_zero(position.x), snap_zero(position.y), snap_zero(position.z)),
            rotation: DVec3::new(snap_zero(x), snap_zero(y), snap_zero(z)),
            scale: DVec3::new(snap_one(scale.x), snap_one(scale.y), snap_one(scale.z)),
        }
    }

    /// Returns true when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

fn snap_zero(value: f64) -> f64 {
    if approx_zero(value) {
        0.0
    } else {
        value
    }
}

fn snap_one(value: f64) -> f64 {
    if approx_equal(value, 1.0) {
        1.0
    } else {
        value
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn test_rotation_about_z() {
        let t = Transform {
            rotation: DVec3::new(0.0, 0.0, FRAC_PI_2),
            ..Transform::IDENTITY
        };
        let p = t.to_matrix().transform_point3(DVec3::X);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_applied_before_z() {
        // X then Z: +Y -> +Z (about X) -> stays +Z (about Z)
        let t = Transform {
            rotation: DVec3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
            ..Transform::IDENTITY
        };
        let p = t.to_matrix().transform_point3(DVec3::Y);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_decomposition() {
        let t = Transform {
            position: DVec3::new(1.0, -2.0, 3.0),
            rotation: DVec3::new(0.1, 0.2, 0.3),
            scale: DVec3::new(2.0, 3.0, 4.0),
        };
        let back = Transform::from_matrix(&t.to_matrix());
        assert_relative_eq!(back.position.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(back.rotation.y, 0.2, epsilon = 1e-9);
        assert_relative_eq!(back.rotation.z, 0.3, epsilon = 1e-9);
        assert_relative_eq!(back.scale.z, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_decomposition_snaps_noise() {
        let t = Transform {
            position: DVec3::new(0.0, 5.0, 0.0),
            rotation: DVec3::new(0.7, 0.0, 0.0),
            scale: DVec3::ONE,
        };
        let m = DMat4::from_rotation_x(-0.7) * t.to_matrix();
        let back = Transform::from_matrix(&m);
        assert_eq!(back.rotation, DVec3::ZERO);
        assert_eq!(back.scale, DVec3::ONE);
        assert_eq!(back.position.x, 0.0);
    }
}
