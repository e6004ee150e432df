//! # Host Contract
//!
//! The scene-authoring services the build core calls into. A host owns every
//! object, mesh and material; the core only holds handles.
//!
//! Besides structural edits the contract includes the host's UI bookkeeping
//! (active object, selection, interaction mode): booleans are applied to the
//! *active* object, so the core has to keep that state in order.

use glam::DMat4;

use crate::error::HostResult;
use crate::geometry::BooleanOp;
use crate::ids::{MaterialId, ObjectId};
use crate::material::Rgba;
use crate::primitive::{PrimitiveKind, PrimitiveParams};
use crate::transform::Transform;

/// Scene-authoring services of a 3D content host.
pub trait Host {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Builds a primitive mesh object at the kind's default placement, links
    /// it into the scene and makes it the active, sole selected object.
    fn create_primitive(
        &mut self,
        kind: PrimitiveKind,
        params: &PrimitiveParams,
    ) -> HostResult<ObjectId>;

    /// Creates an unlinked object named `name` owning a new empty mesh of the
    /// same name.
    fn create_mesh_object(&mut self, name: &str) -> HostResult<ObjectId>;

    /// Shallow copy sharing the source's mesh data. The copy is not linked.
    fn copy_object(&mut self, source: ObjectId) -> HostResult<ObjectId>;

    /// Deletes an object and, recursively, its children.
    fn delete_object(&mut self, object: ObjectId) -> HostResult<()>;

    // =========================================================================
    // PLACEMENT
    // =========================================================================

    fn transform(&self, object: ObjectId) -> HostResult<Transform>;

    fn set_transform(&mut self, object: ObjectId, transform: &Transform) -> HostResult<()>;

    /// Object-to-world matrix including every parent.
    fn world_matrix(&self, object: ObjectId) -> HostResult<DMat4>;

    /// Sets the local transform so the object lands at `matrix` in world
    /// space.
    fn set_world_matrix(&mut self, object: ObjectId, matrix: &DMat4) -> HostResult<()>;

    /// Parents `child` under `parent`, keeping the child's local transform.
    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> HostResult<()>;

    fn link_into_scene(&mut self, object: ObjectId) -> HostResult<()>;

    /// Renames an object; a taken name gets a numeric suffix.
    fn set_name(&mut self, object: ObjectId, name: &str) -> HostResult<()>;

    /// Flags an object as an instancing template, hidden from the final
    /// model.
    fn set_template(&mut self, object: ObjectId, template: bool) -> HostResult<()>;

    // =========================================================================
    // GEOMETRY & MATERIALS
    // =========================================================================

    /// Adds a boolean modifier on `target` referencing `operand` and applies
    /// it. `target` must be the active object.
    fn apply_boolean(
        &mut self,
        target: ObjectId,
        operand: ObjectId,
        op: BooleanOp,
    ) -> HostResult<()>;

    /// Creates a node-based material with the given base color and metallic
    /// factor.
    fn create_material(&mut self, name: &str, base_color: Rgba, metallic: f64)
        -> HostResult<MaterialId>;

    /// Removes the material named `name`, returning whether one existed.
    fn remove_material_if_exists(&mut self, name: &str) -> HostResult<bool>;

    /// Appends a material slot to the object's mesh.
    fn attach_material(&mut self, object: ObjectId, material: MaterialId) -> HostResult<()>;

    // =========================================================================
    // QUERIES
    // =========================================================================

    fn find_object(&self, name: &str) -> Option<ObjectId>;

    fn object_name(&self, object: ObjectId) -> HostResult<String>;

    fn exists(&self, object: ObjectId) -> bool;

    // =========================================================================
    // UI STATE
    // =========================================================================

    fn set_active(&mut self, object: ObjectId) -> HostResult<()>;

    fn active_object(&self) -> Option<ObjectId>;

    fn clear_selection(&mut self);

    /// Leaves edit mode. Requires an active object.
    fn force_object_mode(&mut self) -> HostResult<()>;
}
