//! # Geometry Expressions
//!
//! Mesh contents as recorded by the reference [`Scene`](crate::Scene).
//!
//! The scene never evaluates a boolean. Baking a modifier wraps the target's
//! current geometry and the operand's geometry in a [`Geometry::Boolean`]
//! node, with the operand expressed in the target's local space. The tree can
//! be inspected, serialized, or handed to a real kernel later.
//!
//! ## Example
//!
//! ```rust
//! use glam::{DMat4, DVec3};
//! use paragen_scene::{BooleanOp, Geometry, PrimitiveKind, PrimitiveParams};
//!
//! let cube = Geometry::primitive(PrimitiveKind::Cube, PrimitiveParams::new()).unwrap();
//! let moved = cube.clone().transformed(DMat4::from_translation(DVec3::X * 5.0));
//! let both = cube.combine(BooleanOp::Union, moved);
//! let bounds = both.bounds().unwrap();
//! assert_eq!(bounds.min.x, -1.0);
//! assert_eq!(bounds.max.x, 6.0);
//! ```

use std::fmt;

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::HostResult;
use crate::primitive::{PrimitiveKind, PrimitiveParams};

// =============================================================================
// BOOLEAN OPERATION
// =============================================================================

/// Set operation applied by a boolean modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BooleanOp {
    /// Keep the volume covered by either solid
    Union,
    /// Remove the operand's volume from the target
    Difference,
    /// Keep only the overlapping volume
    Intersect,
}

impl BooleanOp {
    /// Identifier the host uses for the operation (`"UNION"`).
    pub fn as_str(self) -> &'static str {
        match self {
            BooleanOp::Union => "UNION",
            BooleanOp::Difference => "DIFFERENCE",
            BooleanOp::Intersect => "INTERSECT",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin.
    pub fn from_half_extents(half: DVec3) -> Self {
        Self::new(-half, half)
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Smallest box enclosing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Overlap of both boxes, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.cmple(max).all() {
            Some(Aabb::new(min, max))
        } else {
            None
        }
    }

    /// Box enclosing this box after an affine transform.
    pub fn transformed(&self, matrix: &DMat4) -> Aabb {
        let corners = (0..8).map(|i| {
            DVec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        });
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for corner in corners {
            let p = matrix.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Aabb::new(min, max)
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Recorded mesh contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Mesh with no faces.
    Empty,

    /// Primitive as built by the host constructor, with resolved parameters.
    Primitive {
        kind: PrimitiveKind,
        params: PrimitiveParams,
    },

    /// Child geometry moved into a parent space.
    Transformed {
        matrix: DMat4,
        child: Box<Geometry>,
    },

    /// Baked boolean modifier.
    Boolean {
        op: BooleanOp,
        base: Box<Geometry>,
        operand: Box<Geometry>,
    },
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::Empty
    }
}

impl Geometry {
    /// Primitive leaf with parameters validated and defaults filled in.
    pub fn primitive(kind: PrimitiveKind, params: PrimitiveParams) -> HostResult<Self> {
        let params = kind.resolve(&params)?;
        Ok(Geometry::Primitive { kind, params })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Geometry::Empty)
    }

    /// Wraps the geometry in a transform.
    ///
    /// Identity transforms are dropped and nested transforms are folded into
    /// one matrix.
    pub fn transformed(self, matrix: DMat4) -> Geometry {
        if matrix == DMat4::IDENTITY {
            return self;
        }
        match self {
            Geometry::Empty => Geometry::Empty,
            Geometry::Transformed { matrix: inner, child } => {
                (*child).transformed(matrix * inner)
            }
            other => Geometry::Transformed {
                matrix,
                child: Box::new(other),
            },
        }
    }

    /// Result of baking `op` with `operand` into this geometry.
    ///
    /// An empty base takes the operand's shape on union and stays empty
    /// otherwise; an empty operand leaves union and difference untouched.
    pub fn combine(self, op: BooleanOp, operand: Geometry) -> Geometry {
        match (self.is_empty(), operand.is_empty(), op) {
            (true, _, BooleanOp::Union) => operand,
            (true, _, _) => Geometry::Empty,
            (false, true, BooleanOp::Intersect) => Geometry::Empty,
            (false, true, _) => self,
            (false, false, _) => Geometry::Boolean {
                op,
                base: Box::new(self),
                operand: Box::new(operand),
            },
        }
    }

    /// Conservative bounding box, `None` for provably empty geometry.
    ///
    /// Differences keep the base's box; intersections use the overlap of the
    /// two boxes.
    pub fn bounds(&self) -> Option<Aabb> {
        match self {
            Geometry::Empty => None,
            Geometry::Primitive { kind, params } => Some(primitive_bounds(*kind, params)),
            Geometry::Transformed { matrix, child } => {
                child.bounds().map(|b| b.transformed(matrix))
            }
            Geometry::Boolean { op, base, operand } => match op {
                BooleanOp::Union => match (base.bounds(), operand.bounds()) {
                    (Some(a), Some(b)) => Some(a.union(&b)),
                    (a, b) => a.or(b),
                },
                BooleanOp::Difference => base.bounds(),
                BooleanOp::Intersect => match (base.bounds(), operand.bounds()) {
                    (Some(a), Some(b)) => a.intersection(&b),
                    _ => None,
                },
            },
        }
    }

    /// Whether every leaf encloses a volume.
    ///
    /// A boolean involving an open surface (circle, plane) produces
    /// non-manifold output; the host still bakes it.
    pub fn is_closed(&self) -> bool {
        match self {
            Geometry::Empty => true,
            Geometry::Primitive { kind, .. } => kind.is_closed(),
            Geometry::Transformed { child, .. } => child.is_closed(),
            Geometry::Boolean { base, operand, .. } => base.is_closed() && operand.is_closed(),
        }
    }

    /// Number of primitive leaves.
    pub fn primitive_count(&self) -> usize {
        match self {
            Geometry::Empty => 0,
            Geometry::Primitive { .. } => 1,
            Geometry::Transformed { child, .. } => child.primitive_count(),
            Geometry::Boolean { base, operand, .. } => {
                base.primitive_count() + operand.primitive_count()
            }
        }
    }

    /// Number of baked booleans.
    pub fn boolean_count(&self) -> usize {
        match self {
            Geometry::Empty | Geometry::Primitive { .. } => 0,
            Geometry::Transformed { child, .. } => child.boolean_count(),
            Geometry::Boolean { base, operand, .. } => {
                1 + base.boolean_count() + operand.boolean_count()
            }
        }
    }
}

/// Local-space box of a primitive at the host's default placement.
fn primitive_bounds(kind: PrimitiveKind, params: &PrimitiveParams) -> Aabb {
    let get = |name: &str| params.get_f64(name).unwrap_or(0.0);
    let half = match kind {
        PrimitiveKind::Cube => DVec3::splat(get("size") * 0.5),
        PrimitiveKind::Cylinder => {
            let r = get("radius");
            DVec3::new(r, r, get("depth") * 0.5)
        }
        PrimitiveKind::Cone => {
            let r = get("radius1").max(get("radius2"));
            DVec3::new(r, r, get("depth") * 0.5)
        }
        PrimitiveKind::UvSphere | PrimitiveKind::IcoSphere => DVec3::splat(get("radius")),
        PrimitiveKind::Circle => {
            let r = get("radius");
            DVec3::new(r, r, 0.0)
        }
        PrimitiveKind::Plane => {
            let h = get("size") * 0.5;
            DVec3::new(h, h, 0.0)
        }
        PrimitiveKind::Torus => {
            let minor = get("minor_radius");
            let outer = get("major_radius") + minor;
            DVec3::new(outer, outer, minor)
        }
        // Suzanne's extents at unit half-size
        PrimitiveKind::Monkey => DVec3::new(1.367, 0.852, 0.984) * (get("size") * 0.5),
    };
    Aabb::from_half_extents(half.abs())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(size: f64) -> Geometry {
        Geometry::primitive(PrimitiveKind::Cube, PrimitiveParams::new().with("size", size)).unwrap()
    }

    #[test]
    fn test_union_into_empty_takes_operand() {
        let g = Geometry::Empty.combine(BooleanOp::Union, cube(2.0));
        assert_eq!(g, cube(2.0));
    }

    #[test]
    fn test_difference_from_empty_stays_empty() {
        let g = Geometry::Empty.combine(BooleanOp::Difference, cube(2.0));
        assert!(g.is_empty());
    }

    #[test]
    fn test_nested_transforms_fold() {
        let t = DMat4::from_translation(DVec3::X);
        let g = cube(1.0).transformed(t).transformed(t);
        match g {
            Geometry::Transformed { matrix, .. } => {
                assert_eq!(matrix.transform_point3(DVec3::ZERO), DVec3::new(2.0, 0.0, 0.0));
            }
            other => panic!("Expected Transformed, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_transform_dropped() {
        assert_eq!(cube(1.0).transformed(DMat4::IDENTITY), cube(1.0));
    }

    #[test]
    fn test_disjoint_intersection_is_empty() {
        let far = cube(1.0).transformed(DMat4::from_translation(DVec3::X * 10.0));
        let g = cube(1.0).combine(BooleanOp::Intersect, far);
        assert!(g.bounds().is_none());
    }

    #[test]
    fn test_difference_keeps_base_bounds() {
        let g = cube(4.0).combine(BooleanOp::Difference, cube(1.0));
        let b = g.bounds().unwrap();
        assert_eq!(b.size(), DVec3::splat(4.0));
    }

    #[test]
    fn test_circle_makes_result_open() {
        let circle =
            Geometry::primitive(PrimitiveKind::Circle, PrimitiveParams::new()).unwrap();
        let g = cube(1.0).combine(BooleanOp::Union, circle);
        assert!(!g.is_closed());
        assert_eq!(g.boolean_count(), 1);
        assert_eq!(g.primitive_count(), 2);
    }

    #[test]
    fn test_rotated_box_grows() {
        let rot = DMat4::from_rotation_z(std::f64::consts::FRAC_PI_4);
        let b = Aabb::from_half_extents(DVec3::ONE).transformed(&rot);
        assert!(b.max.x > 1.4);
    }
}
