//! # Transform Utility
//!
//! Partial transforms: each channel (position, rotation, scale) may be set as
//! a whole vector, per axis, or both. Unset channels leave the object's
//! current value alone. A per-axis value always wins over the vector on its
//! axis.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use paragen::TransformSpec;
//! use paragen_scene::Transform;
//!
//! let spec = TransformSpec::new()
//!     .position(DVec3::new(1.0, 2.0, 3.0))
//!     .position_x(9.0);
//! let t = spec.resolve(&Transform::IDENTITY);
//! assert_eq!(t.position, DVec3::new(9.0, 2.0, 3.0));
//! ```

use glam::DVec3;
use paragen_scene::{Host, ObjectId, Transform};

use crate::error::BuildResult;

// =============================================================================
// CHANNEL
// =============================================================================

/// One vector channel with optional per-axis overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Channel {
    /// Whole-vector value.
    pub vector: Option<DVec3>,
    /// Per-axis overrides, X Y Z.
    pub axes: [Option<f64>; 3],
}

impl Channel {
    pub fn is_empty(&self) -> bool {
        self.vector.is_none() && self.axes.iter().all(Option::is_none)
    }

    /// Applies the channel on top of `current`.
    pub fn resolve(&self, current: DVec3) -> DVec3 {
        let base = self.vector.unwrap_or(current);
        DVec3::new(
            self.axes[0].unwrap_or(base.x),
            self.axes[1].unwrap_or(base.y),
            self.axes[2].unwrap_or(base.z),
        )
    }
}

// =============================================================================
// TRANSFORM SPEC
// =============================================================================

/// Partial transform applied to an object.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformSpec {
    pub position: Channel,
    /// Euler XYZ, radians.
    pub rotation: Channel,
    pub scale: Channel,
}

impl TransformSpec {
    /// Spec that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: DVec3) -> Self {
        self.position.vector = Some(position);
        self
    }

    pub fn position_x(mut self, x: f64) -> Self {
        self.position.axes[0] = Some(x);
        self
    }

    pub fn position_y(mut self, y: f64) -> Self {
        self.position.axes[1] = Some(y);
        self
    }

    pub fn position_z(mut self, z: f64) -> Self {
        self.position.axes[2] = Some(z);
        self
    }

    pub fn rotation(mut self, rotation: DVec3) -> Self {
        self.rotation.vector = Some(rotation);
        self
    }

    pub fn rotation_x(mut self, x: f64) -> Self {
        self.rotation.axes[0] = Some(x);
        self
    }

    pub fn rotation_y(mut self, y: f64) -> Self {
        self.rotation.axes[1] = Some(y);
        self
    }

    pub fn rotation_z(mut self, z: f64) -> Self {
        self.rotation.axes[2] = Some(z);
        self
    }

    pub fn scale(mut self, scale: DVec3) -> Self {
        self.scale.vector = Some(scale);
        self
    }

    pub fn scale_x(mut self, x: f64) -> Self {
        self.scale.axes[0] = Some(x);
        self
    }

    pub fn scale_y(mut self, y: f64) -> Self {
        self.scale.axes[1] = Some(y);
        self
    }

    pub fn scale_z(mut self, z: f64) -> Self {
        self.scale.axes[2] = Some(z);
        self
    }

    /// Same factor on all three axes.
    pub fn uniform_scale(self, factor: f64) -> Self {
        self.scale(DVec3::splat(factor))
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty() && self.rotation.is_empty() && self.scale.is_empty()
    }

    /// Effective transform when applied on top of `current`.
    pub fn resolve(&self, current: &Transform) -> Transform {
        Transform {
            position: self.position.resolve(current.position),
            rotation: self.rotation.resolve(current.rotation),
            scale: self.scale.resolve(current.scale),
        }
    }
}

impl From<Transform> for TransformSpec {
    fn from(t: Transform) -> Self {
        TransformSpec::new()
            .position(t.position)
            .rotation(t.rotation)
            .scale(t.scale)
    }
}

/// Spec with only a position set.
pub fn at(x: f64, y: f64, z: f64) -> TransformSpec {
    TransformSpec::new().position(DVec3::new(x, y, z))
}

/// Applies `spec` to a host object.
///
/// An empty spec performs no host call.
pub fn apply_transform<H: Host>(
    host: &mut H,
    object: ObjectId,
    spec: &TransformSpec,
) -> BuildResult<()> {
    if spec.is_empty() {
        return Ok(());
    }
    let current = host.transform(object)?;
    host.set_transform(object, &spec.resolve(&current))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_override_wins() {
        let spec = TransformSpec::new()
            .position(DVec3::new(1.0, 2.0, 3.0))
            .position_x(9.0);
        let t = spec.resolve(&Transform::IDENTITY);
        assert_eq!(t.position, DVec3::new(9.0, 2.0, 3.0));
    }

    #[test]
    fn test_axis_only_keeps_current() {
        let current = Transform::from_position(DVec3::new(4.0, 5.0, 6.0));
        let t = TransformSpec::new().position_z(0.0).resolve(&current);
        assert_eq!(t.position, DVec3::new(4.0, 5.0, 0.0));
    }

    #[test]
    fn test_unset_channels_untouched() {
        let current = Transform {
            position: DVec3::ONE,
            rotation: DVec3::new(0.0, 0.0, 1.0),
            scale: DVec3::splat(2.0),
        };
        let t = at(0.0, 0.0, 0.0).resolve(&current);
        assert_eq!(t.rotation, current.rotation);
        assert_eq!(t.scale, current.scale);
        assert_eq!(t.position, DVec3::ZERO);
    }

    #[test]
    fn test_scale_and_rotation_overrides() {
        let t = TransformSpec::new()
            .uniform_scale(3.0)
            .scale_y(0.5)
            .rotation_z(1.5)
            .resolve(&Transform::IDENTITY);
        assert_eq!(t.scale, DVec3::new(3.0, 0.5, 3.0));
        assert_eq!(t.rotation, DVec3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn test_is_empty() {
        assert!(TransformSpec::new().is_empty());
        assert!(!TransformSpec::new().rotation_x(0.0).is_empty());
    }

    #[test]
    fn test_from_transform_sets_all_channels() {
        let spec = TransformSpec::from(Transform::IDENTITY);
        let current = Transform::from_position(DVec3::ONE);
        assert_eq!(spec.resolve(&current), Transform::IDENTITY);
    }
}
