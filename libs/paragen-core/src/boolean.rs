//! # Boolean Composer
//!
//! Bakes union / difference / intersect operands into the current frame's
//! active object.
//!
//! ## Baking
//!
//! 1. Build the operand if it is a primitive spec (it stays a temporary)
//! 2. Place the operand
//! 3. Re-assert the frame's object as the host's active object
//! 4. Apply the host boolean, then clear the selection
//!
//! Non-manifold operands (circles, planes) are baked as-is; the result is
//! not checked.

use log::trace;
use paragen_scene::{BooleanOp, Host, ObjectId, PrimitiveKind};

use crate::error::{BuildError, BuildResult};
use crate::primitive::PrimSpec;
use crate::transform::{apply_transform, TransformSpec};
use crate::Paragen;

/// Boolean operand: an existing object or a primitive to build first.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Object(ObjectId),
    Primitive(PrimSpec),
}

impl From<ObjectId> for Operand {
    fn from(id: ObjectId) -> Self {
        Operand::Object(id)
    }
}

impl From<PrimSpec> for Operand {
    fn from(spec: PrimSpec) -> Self {
        Operand::Primitive(spec)
    }
}

impl From<PrimitiveKind> for Operand {
    fn from(kind: PrimitiveKind) -> Self {
        Operand::Primitive(PrimSpec::new(kind))
    }
}

impl<H: Host> Paragen<H> {
    /// Resolves an operand to an object, building primitives as temporaries.
    pub(crate) fn operand_object(&mut self, operand: Operand) -> BuildResult<ObjectId> {
        match operand {
            Operand::Object(id) => Ok(id),
            Operand::Primitive(spec) => self.prim(spec),
        }
    }

    /// Bakes `operand` into the active object with `op`.
    ///
    /// `transform` is applied to the operand before baking. The operand
    /// itself is left in the scene.
    pub fn boolean(
        &mut self,
        op: BooleanOp,
        operand: impl Into<Operand>,
        transform: TransformSpec,
    ) -> BuildResult<()> {
        let active = self
            .stack
            .current()
            .map(|frame| frame.active)
            .ok_or_else(|| BuildError::no_frame(op.as_str()))?;

        let operand = self.operand_object(operand.into())?;
        apply_transform(&mut self.host, operand, &transform)?;

        self.host.set_active(active)?;
        self.host.apply_boolean(active, operand, op)?;
        self.host.clear_selection();
        trace!("{} baked into {:?}", op, active);
        Ok(())
    }

    pub fn union(
        &mut self,
        operand: impl Into<Operand>,
        transform: TransformSpec,
    ) -> BuildResult<()> {
        self.boolean(BooleanOp::Union, operand, transform)
    }

    pub fn difference(
        &mut self,
        operand: impl Into<Operand>,
        transform: TransformSpec,
    ) -> BuildResult<()> {
        self.boolean(BooleanOp::Difference, operand, transform)
    }

    pub fn intersect(
        &mut self,
        operand: impl Into<Operand>,
        transform: TransformSpec,
    ) -> BuildResult<()> {
        self.boolean(BooleanOp::Intersect, operand, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::at;
    use paragen_scene::{Geometry, Scene};

    fn setup() -> (Paragen<Scene>, ObjectId) {
        let mut paragen = Paragen::new(Scene::new());
        let root = paragen.host_mut().create_mesh_object("Root").unwrap();
        (paragen, root)
    }

    #[test]
    fn test_union_outside_frame_fails() {
        let (mut paragen, _) = setup();
        let result = paragen.union(PrimitiveKind::Cube, TransformSpec::new());
        assert!(matches!(result, Err(BuildError::NoActiveFrame { .. })));
        assert_eq!(paragen.host().object_count(), 1);
    }

    #[test]
    fn test_union_primitive_into_empty_root() {
        let (mut paragen, root) = setup();
        paragen
            .scoped(root, |p| p.union(PrimitiveKind::Cube, at(0.0, 0.0, 1.0)))
            .unwrap();

        let geometry = paragen.host().geometry_of(root).unwrap();
        assert!(matches!(geometry, Geometry::Transformed { .. }));
        assert_eq!(geometry.primitive_count(), 1);
        assert_eq!(paragen.host().object_count(), 1);
    }

    #[test]
    fn test_boolean_reasserts_active_object() {
        let (mut paragen, root) = setup();
        paragen
            .scoped(root, |p| {
                let tool = p.prim(PrimitiveKind::Cylinder)?;
                assert_eq!(p.host().active_object(), Some(tool));
                p.union(PrimitiveKind::Cube, TransformSpec::new())?;
                p.difference(tool, TransformSpec::new())?;
                assert_eq!(p.host().active_object(), Some(root));
                assert!(p.host().selected().is_empty());
                Ok(())
            })
            .unwrap();
        assert_eq!(paragen.host().geometry_of(root).unwrap().boolean_count(), 1);
    }

    #[test]
    fn test_existing_operand_is_kept_until_pop() {
        let (mut paragen, root) = setup();
        paragen
            .scoped(root, |p| {
                let wall = p.prim(PrimitiveKind::Cube)?;
                p.union(wall, at(10.0, 0.0, 0.0))?;
                p.union(wall, at(-10.0, 0.0, 0.0))?;
                assert!(p.host().exists(wall));
                Ok(())
            })
            .unwrap();

        let bounds = paragen.host().world_bounds(root).unwrap().unwrap();
        assert_relative_eq!(bounds.size().x, 22.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersect_keeps_overlap() {
        let (mut paragen, root) = setup();
        paragen
            .scoped(root, |p| {
                p.union(PrimitiveKind::Cube, TransformSpec::new())?;
                p.intersect(PrimitiveKind::Cube, at(1.0, 0.0, 0.0))
            })
            .unwrap();

        let bounds = paragen.host().world_bounds(root).unwrap().unwrap();
        assert_relative_eq!(bounds.size().x, 1.0, epsilon = 1e-9);
    }
}
