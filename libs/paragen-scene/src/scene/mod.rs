//! # Reference Scene
//!
//! In-memory [`Host`] that records what a 3D content host would do.
//!
//! ## Behavior
//!
//! - Objects, meshes and materials live in slot maps behind stable handles
//! - Copies share mesh data; a mesh is freed when its last object goes away
//! - Names are unique per datablock type; clashes get `.001`-style suffixes
//! - Booleans are recorded as [`Geometry::Boolean`] nodes, never evaluated
//! - Active object, selection and mode are tracked and enforced: a boolean
//!   must target the active object, and nothing structural happens in edit
//!   mode
//!
//! ## Example
//!
//! ```rust
//! use paragen_scene::{BooleanOp, Host, PrimitiveKind, PrimitiveParams, Scene};
//!
//! let mut scene = Scene::new();
//! let base = scene.create_primitive(PrimitiveKind::Cube, &PrimitiveParams::new()).unwrap();
//! let hole = scene.create_primitive(PrimitiveKind::Cylinder, &PrimitiveParams::new()).unwrap();
//!
//! scene.set_active(base).unwrap();
//! scene.apply_boolean(base, hole, BooleanOp::Difference).unwrap();
//! assert_eq!(scene.geometry_of(base).unwrap().boolean_count(), 1);
//! ```

mod snapshot;

#[cfg(test)]
mod tests;

pub use snapshot::{ObjectSnapshot, SceneSnapshot};

use config::constants::{suffixed_name, NAME_SEPARATOR, NAME_SUFFIX_DIGITS};
use glam::DMat4;
use log::trace;
use slotmap::SlotMap;

use crate::error::{HostError, HostResult};
use crate::geometry::{Aabb, BooleanOp, Geometry};
use crate::host::Host;
use crate::ids::{MaterialId, MeshId, ObjectId};
use crate::material::{Material, Rgba};
use crate::primitive::{PrimitiveKind, PrimitiveParams};
use crate::transform::Transform;

// =============================================================================
// DATABLOCKS
// =============================================================================

/// A scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    /// Transform relative to the parent.
    pub transform: Transform,
    pub mesh: Option<MeshId>,
    pub parent: Option<ObjectId>,
    pub children: Vec<ObjectId>,
    /// Whether the object is part of the scene's collection.
    pub linked: bool,
    /// Instancing template, hidden from the final model.
    pub template: bool,
}

/// Mesh datablock, possibly shared by several objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    /// Material slots in order.
    pub materials: Vec<MaterialId>,
}

/// Interaction mode of the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Object,
    Edit,
}

// =============================================================================
// SCENE
// =============================================================================

/// Recording host.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, Object>,
    meshes: SlotMap<MeshId, Mesh>,
    materials: SlotMap<MaterialId, Material>,
    active: Option<ObjectId>,
    selected: Vec<ObjectId>,
    mode: Mode,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Objects whose name starts with `prefix`.
    pub fn objects_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (ObjectId, &'a Object)> + 'a {
        self.objects
            .iter()
            .filter(move |(_, o)| o.name.starts_with(prefix))
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects
            .get(id)
            .map(|o| o.children.as_slice())
            .unwrap_or(&[])
    }

    /// Objects without a parent.
    pub fn roots(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, o)| o.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id)
    }

    pub fn mesh_of(&self, object: ObjectId) -> Option<&Mesh> {
        self.objects
            .get(object)
            .and_then(|o| o.mesh)
            .and_then(|m| self.meshes.get(m))
    }

    pub fn geometry_of(&self, object: ObjectId) -> Option<&Geometry> {
        self.mesh_of(object).map(|m| &m.geometry)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of objects using `mesh`.
    pub fn mesh_users(&self, mesh: MeshId) -> usize {
        self.objects
            .values()
            .filter(|o| o.mesh == Some(mesh))
            .count()
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn material_by_name(&self, name: &str) -> Option<(MaterialId, &Material)> {
        self.materials.iter().find(|(_, m)| m.name == name)
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials.iter()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Names of the material slots on an object's mesh.
    pub fn material_names(&self, object: ObjectId) -> Vec<String> {
        self.mesh_of(object)
            .map(|mesh| {
                mesh.materials
                    .iter()
                    .filter_map(|m| self.materials.get(*m))
                    .map(|m| m.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// World-space bounding box of an object's geometry.
    pub fn world_bounds(&self, object: ObjectId) -> HostResult<Option<Aabb>> {
        let matrix = self.world_matrix(object)?;
        Ok(self
            .geometry_of(object)
            .and_then(Geometry::bounds)
            .map(|b| b.transformed(&matrix)))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Enters edit mode on `object`, making it active.
    pub fn enter_edit_mode(&mut self, object: ObjectId) -> HostResult<()> {
        self.object_ref(object)?;
        self.active = Some(object);
        self.mode = Mode::Edit;
        Ok(())
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Handle-free view of the scene.
    pub fn snapshot(&self) -> SceneSnapshot {
        let mut objects: Vec<ObjectSnapshot> = self
            .objects
            .values()
            .map(|o| {
                let mesh = o.mesh.and_then(|m| self.meshes.get(m));
                ObjectSnapshot {
                    name: o.name.clone(),
                    parent: o
                        .parent
                        .and_then(|p| self.objects.get(p))
                        .map(|p| p.name.clone()),
                    transform: o.transform,
                    linked: o.linked,
                    template: o.template,
                    mesh: mesh.map(|m| m.name.clone()),
                    geometry: mesh.map(|m| m.geometry.clone()),
                    materials: mesh
                        .map(|m| {
                            m.materials
                                .iter()
                                .filter_map(|id| self.materials.get(*id))
                                .map(|mat| mat.name.clone())
                                .collect()
                        })
                        .unwrap_or_default(),
                }
            })
            .collect();
        objects.sort_by(|a, b| a.name.cmp(&b.name));

        let mut materials: Vec<Material> = self.materials.values().cloned().collect();
        materials.sort_by(|a, b| a.name.cmp(&b.name));

        SceneSnapshot {
            objects,
            materials,
            mesh_count: self.meshes.len(),
        }
    }

    /// Snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> HostResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn object_ref(&self, id: ObjectId) -> HostResult<&Object> {
        self.objects.get(id).ok_or(HostError::UnknownObject(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> HostResult<&mut Object> {
        self.objects.get_mut(id).ok_or(HostError::UnknownObject(id))
    }

    fn require_object_mode(&self, operation: &str) -> HostResult<()> {
        match self.mode {
            Mode::Object => Ok(()),
            Mode::Edit => Err(HostError::edit_mode(operation)),
        }
    }

    fn unique_object_name(&self, base: &str, except: Option<ObjectId>) -> String {
        unique_name(base, |candidate| {
            self.objects
                .iter()
                .any(|(id, o)| Some(id) != except && o.name == candidate)
        })
    }

    fn unique_mesh_name(&self, base: &str) -> String {
        unique_name(base, |candidate| {
            self.meshes.values().any(|m| m.name == candidate)
        })
    }

    fn unique_material_name(&self, base: &str) -> String {
        unique_name(base, |candidate| {
            self.materials.values().any(|m| m.name == candidate)
        })
    }

    /// Inserts a new object with its own mesh.
    fn insert_with_mesh(&mut self, name: &str, geometry: Geometry, linked: bool) -> ObjectId {
        let mesh_name = self.unique_mesh_name(name);
        let mesh = self.meshes.insert(Mesh {
            name: mesh_name,
            geometry,
            materials: Vec::new(),
        });
        let object_name = self.unique_object_name(name, None);
        self.objects.insert(Object {
            name: object_name,
            transform: Transform::IDENTITY,
            mesh: Some(mesh),
            parent: None,
            children: Vec::new(),
            linked,
            template: false,
        })
    }

    /// True if `ancestor` appears on `object`'s parent chain (or is `object`).
    fn is_ancestor(&self, ancestor: ObjectId, object: ObjectId) -> bool {
        let mut current = Some(object);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.objects.get(id).and_then(|o| o.parent);
        }
        false
    }

    fn detach_from_parent(&mut self, child: ObjectId) {
        let parent = self.objects.get(child).and_then(|o| o.parent);
        if let Some(parent) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent.children.retain(|c| *c != child);
        }
        if let Some(obj) = self.objects.get_mut(child) {
            obj.parent = None;
        }
    }

    fn release_mesh(&mut self, mesh: MeshId) {
        if self.mesh_users(mesh) == 0 {
            if let Some(removed) = self.meshes.remove(mesh) {
                trace!("freed mesh '{}'", removed.name);
            }
        }
    }

    fn parent_world(&self, object: ObjectId) -> HostResult<DMat4> {
        match self.object_ref(object)?.parent {
            Some(parent) => self.world_matrix(parent),
            None => Ok(DMat4::IDENTITY),
        }
    }
}

/// Returns `base`, or the first free `.NNN` variant of its stem.
fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let stem = strip_numeric_suffix(base);
    let mut index = 1;
    loop {
        let candidate = suffixed_name(stem, index);
        if !taken(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// `"Cube.003"` -> `"Cube"`; other names are returned unchanged.
fn strip_numeric_suffix(name: &str) -> &str {
    match name.rsplit_once(NAME_SEPARATOR) {
        Some((stem, suffix))
            if !stem.is_empty()
                && suffix.len() >= NAME_SUFFIX_DIGITS
                && suffix.chars().all(|c| c.is_ascii_digit()) =>
        {
            stem
        }
        _ => name,
    }
}

// =============================================================================
// HOST IMPLEMENTATION
// =============================================================================

impl Host for Scene {
    fn create_primitive(
        &mut self,
        kind: PrimitiveKind,
        params: &PrimitiveParams,
    ) -> HostResult<ObjectId> {
        self.require_object_mode("add a primitive object")?;
        let geometry = Geometry::primitive(kind, params.clone())?;
        let id = self.insert_with_mesh(kind.default_object_name(), geometry, true);
        self.active = Some(id);
        self.selected = vec![id];
        trace!("created {} '{}'", kind, self.objects[id].name);
        Ok(id)
    }

    fn create_mesh_object(&mut self, name: &str) -> HostResult<ObjectId> {
        Ok(self.insert_with_mesh(name, Geometry::Empty, false))
    }

    fn copy_object(&mut self, source: ObjectId) -> HostResult<ObjectId> {
        let src = self.object_ref(source)?;
        let copy = Object {
            name: self.unique_object_name(&src.name, None),
            transform: src.transform,
            mesh: src.mesh,
            parent: src.parent,
            children: Vec::new(),
            linked: false,
            template: src.template,
        };
        let parent = copy.parent;
        let id = self.objects.insert(copy);
        if let Some(parent) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent.children.push(id);
        }
        Ok(id)
    }

    fn delete_object(&mut self, object: ObjectId) -> HostResult<()> {
        let children = self.object_ref(object)?.children.clone();
        for child in children {
            self.delete_object(child)?;
        }

        self.detach_from_parent(object);
        let removed = self.objects.remove(object).ok_or(HostError::UnknownObject(object))?;
        if self.active == Some(object) {
            self.active = None;
        }
        self.selected.retain(|s| *s != object);
        if let Some(mesh) = removed.mesh {
            self.release_mesh(mesh);
        }
        trace!("deleted '{}'", removed.name);
        Ok(())
    }

    fn transform(&self, object: ObjectId) -> HostResult<Transform> {
        Ok(self.object_ref(object)?.transform)
    }

    fn set_transform(&mut self, object: ObjectId, transform: &Transform) -> HostResult<()> {
        let obj = self.object_mut(object)?;
        if !transform.is_finite() {
            return Err(HostError::InvalidTransform {
                name: obj.name.clone(),
            });
        }
        obj.transform = *transform;
        Ok(())
    }

    fn world_matrix(&self, object: ObjectId) -> HostResult<DMat4> {
        let local = self.object_ref(object)?.transform.to_matrix();
        Ok(self.parent_world(object)? * local)
    }

    fn set_world_matrix(&mut self, object: ObjectId, matrix: &DMat4) -> HostResult<()> {
        let local = self.parent_world(object)?.inverse() * *matrix;
        self.set_transform(object, &Transform::from_matrix(&local))
    }

    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> HostResult<()> {
        let child_name = self.object_ref(child)?.name.clone();
        let parent_name = self.object_ref(parent)?.name.clone();
        if self.is_ancestor(child, parent) {
            return Err(HostError::ParentCycle {
                child: child_name,
                parent: parent_name,
            });
        }

        self.detach_from_parent(child);
        self.object_mut(child)?.parent = Some(parent);
        self.object_mut(parent)?.children.push(child);
        Ok(())
    }

    fn link_into_scene(&mut self, object: ObjectId) -> HostResult<()> {
        self.object_mut(object)?.linked = true;
        Ok(())
    }

    fn set_name(&mut self, object: ObjectId, name: &str) -> HostResult<()> {
        self.object_ref(object)?;
        let unique = self.unique_object_name(name, Some(object));
        self.object_mut(object)?.name = unique;
        Ok(())
    }

    fn set_template(&mut self, object: ObjectId, template: bool) -> HostResult<()> {
        self.object_mut(object)?.template = template;
        Ok(())
    }

    fn apply_boolean(
        &mut self,
        target: ObjectId,
        operand: ObjectId,
        op: BooleanOp,
    ) -> HostResult<()> {
        self.require_object_mode("apply a modifier")?;
        let target_obj = self.object_ref(target)?;
        let target_name = target_obj.name.clone();
        let target_mesh = target_obj.mesh.ok_or_else(|| HostError::NoMesh {
            name: target_name.clone(),
        })?;
        let operand_obj = self.object_ref(operand)?;
        let operand_mesh = operand_obj.mesh.ok_or_else(|| HostError::NoMesh {
            name: operand_obj.name.clone(),
        })?;

        if target == operand {
            return Err(HostError::SelfReference { name: target_name });
        }
        if self.active != Some(target) {
            return Err(HostError::not_active(target_name, "modifier_apply"));
        }
        let users = self.mesh_users(target_mesh);
        if users > 1 {
            return Err(HostError::MultiUserData {
                name: target_name,
                users,
            });
        }

        // Operand geometry in the target's local space
        let relative = self.world_matrix(target)?.inverse() * self.world_matrix(operand)?;
        let (operand_geometry, operand_materials) = match self.meshes.get(operand_mesh) {
            Some(mesh) => (mesh.geometry.clone().transformed(relative), mesh.materials.clone()),
            None => (Geometry::Empty, Vec::new()),
        };

        let mesh = self
            .meshes
            .get_mut(target_mesh)
            .ok_or_else(|| HostError::NoMesh {
                name: target_name.clone(),
            })?;
        mesh.geometry = std::mem::take(&mut mesh.geometry).combine(op, operand_geometry);
        for material in operand_materials {
            if !mesh.materials.contains(&material) {
                mesh.materials.push(material);
            }
        }
        trace!("applied {} on '{}'", op, target_name);
        Ok(())
    }

    fn create_material(
        &mut self,
        name: &str,
        base_color: Rgba,
        metallic: f64,
    ) -> HostResult<MaterialId> {
        let name = self.unique_material_name(name);
        Ok(self.materials.insert(Material {
            name,
            base_color,
            metallic,
            use_nodes: true,
        }))
    }

    fn remove_material_if_exists(&mut self, name: &str) -> HostResult<bool> {
        let Some((id, _)) = self.material_by_name(name) else {
            return Ok(false);
        };
        self.materials.remove(id);
        for mesh in self.meshes.values_mut() {
            mesh.materials.retain(|m| *m != id);
        }
        Ok(true)
    }

    fn attach_material(&mut self, object: ObjectId, material: MaterialId) -> HostResult<()> {
        if !self.materials.contains_key(material) {
            return Err(HostError::UnknownMaterial(material));
        }
        let obj = self.object_ref(object)?;
        let mesh_id = obj.mesh.ok_or_else(|| HostError::NoMesh {
            name: obj.name.clone(),
        })?;
        let name = obj.name.clone();
        self.meshes
            .get_mut(mesh_id)
            .ok_or(HostError::NoMesh { name })?
            .materials
            .push(material);
        Ok(())
    }

    fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, _)| id)
    }

    fn object_name(&self, object: ObjectId) -> HostResult<String> {
        Ok(self.object_ref(object)?.name.clone())
    }

    fn exists(&self, object: ObjectId) -> bool {
        self.objects.contains_key(object)
    }

    fn set_active(&mut self, object: ObjectId) -> HostResult<()> {
        self.object_ref(object)?;
        self.active = Some(object);
        Ok(())
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn force_object_mode(&mut self) -> HostResult<()> {
        if self.active.is_none() {
            return Err(HostError::NoActiveObject {
                operation: "mode_set".to_string(),
            });
        }
        self.mode = Mode::Object;
        Ok(())
    }
}
