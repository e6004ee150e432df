//! # Script Host
//!
//! [`BlenderScriptHost`] implements the [`Host`] contract by recording `bpy`
//! statements. Every call is first applied to a shadow [`Scene`], which
//! validates it and answers queries; only calls the shadow accepts are
//! written to the script. Running the script in Blender therefore replays
//! exactly the edits the shadow saw.
//!
//! Objects and materials are bound to Python variables (`obj_3`, `mat_1`)
//! rather than looked up by name, since Blender may rename on collision.
//!
//! ## Example
//!
//! ```rust
//! use paragen_blender::BlenderScriptHost;
//! use paragen_scene::{Host, PrimitiveKind, PrimitiveParams};
//!
//! let mut host = BlenderScriptHost::new();
//! host.create_primitive(PrimitiveKind::Cube, &PrimitiveParams::new()).unwrap();
//! assert!(host.script().contains("bpy.ops.mesh.primitive_cube_add"));
//! ```

use config::constants::{BOOLEAN_MODIFIER_NAME, PRINCIPAL_SHADER_NODE};
use glam::{DMat4, DVec3};
use log::trace;
use paragen_scene::{
    BooleanOp, Host, HostError, HostResult, MaterialId, ObjectId, PrimitiveKind, PrimitiveParams,
    Rgba, Scene, Transform,
};
use slotmap::SecondaryMap;

use crate::script::{py_bool, py_float, py_kwargs, py_matrix, py_rgba, py_str, py_vec3, PythonScript};

/// Host that writes a Blender Python script while mirroring every edit in an
/// in-memory [`Scene`].
#[derive(Debug, Default)]
pub struct BlenderScriptHost {
    shadow: Scene,
    script: PythonScript,
    objects: SecondaryMap<ObjectId, String>,
    materials: SecondaryMap<MaterialId, String>,
    next_object: usize,
    next_material: usize,
}

impl BlenderScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shadow scene holding the expected result.
    pub fn scene(&self) -> &Scene {
        &self.shadow
    }

    pub fn script(&self) -> &PythonScript {
        &self.script
    }

    pub fn into_script(self) -> PythonScript {
        self.script
    }

    /// Full script text, ready to hand to Blender.
    pub fn render(&self) -> String {
        self.script.render()
    }

    // =========================================================================
    // VARIABLES
    // =========================================================================

    fn bind_object(&mut self, id: ObjectId) -> String {
        self.next_object += 1;
        let var = format!("obj_{}", self.next_object);
        self.objects.insert(id, var.clone());
        var
    }

    fn bind_material(&mut self, id: MaterialId) -> String {
        self.next_material += 1;
        let var = format!("mat_{}", self.next_material);
        self.materials.insert(id, var.clone());
        var
    }

    fn object_var(&self, id: ObjectId) -> HostResult<String> {
        self.objects
            .get(id)
            .cloned()
            .ok_or(HostError::UnknownObject(id))
    }

    fn material_var(&self, id: MaterialId) -> HostResult<String> {
        self.materials
            .get(id)
            .cloned()
            .ok_or(HostError::UnknownMaterial(id))
    }

    /// `object` and every descendant, parents first.
    fn subtree(&self, object: ObjectId) -> Vec<ObjectId> {
        let mut out = vec![object];
        let mut i = 0;
        while i < out.len() {
            out.extend_from_slice(self.shadow.children(out[i]));
            i += 1;
        }
        out
    }

    fn emit(&mut self, line: String) {
        trace!("bpy: {line}");
        self.script.push(line);
    }
}

// =============================================================================
// HOST IMPLEMENTATION
// =============================================================================

impl Host for BlenderScriptHost {
    fn create_primitive(
        &mut self,
        kind: PrimitiveKind,
        params: &PrimitiveParams,
    ) -> HostResult<ObjectId> {
        let id = self.shadow.create_primitive(kind, params)?;

        let mut args = py_kwargs(params);
        if !args.is_empty() {
            args.push_str(", ");
        }
        args.push_str(&format!("location={}", py_vec3(DVec3::ZERO)));
        self.emit(format!("bpy.ops.mesh.{}({args})", kind.operator()));

        let var = self.bind_object(id);
        self.emit(format!("{var} = bpy.context.active_object"));
        Ok(id)
    }

    fn create_mesh_object(&mut self, name: &str) -> HostResult<ObjectId> {
        // Leftovers from an earlier run of the script in the same file
        let known = self.shadow.find_object(name).is_some();
        let id = self.shadow.create_mesh_object(name)?;
        let actual = self.shadow.object_name(id)?;

        self.script.comment(&actual);
        if !known {
            self.emit(format!("_delete_named({})", py_str(name)));
        }
        let var = self.bind_object(id);
        let literal = py_str(&actual);
        self.emit(format!(
            "{var} = bpy.data.objects.new({literal}, bpy.data.meshes.new({literal}))"
        ));
        Ok(id)
    }

    fn copy_object(&mut self, source: ObjectId) -> HostResult<ObjectId> {
        let id = self.shadow.copy_object(source)?;
        let source_var = self.object_var(source)?;
        let var = self.bind_object(id);
        self.emit(format!("{var} = {source_var}.copy()"));
        Ok(id)
    }

    fn delete_object(&mut self, object: ObjectId) -> HostResult<()> {
        let doomed = self.subtree(object);
        self.shadow.delete_object(object)?;

        let var = self.object_var(object)?;
        self.emit(format!("_delete({var})"));
        for id in doomed {
            self.objects.remove(id);
        }
        Ok(())
    }

    fn transform(&self, object: ObjectId) -> HostResult<Transform> {
        self.shadow.transform(object)
    }

    fn set_transform(&mut self, object: ObjectId, transform: &Transform) -> HostResult<()> {
        self.shadow.set_transform(object, transform)?;
        let var = self.object_var(object)?;
        self.emit(format!("{var}.location = {}", py_vec3(transform.position)));
        self.emit(format!(
            "{var}.rotation_euler = {}",
            py_vec3(transform.rotation)
        ));
        self.emit(format!("{var}.scale = {}", py_vec3(transform.scale)));
        Ok(())
    }

    fn world_matrix(&self, object: ObjectId) -> HostResult<DMat4> {
        self.shadow.world_matrix(object)
    }

    fn set_world_matrix(&mut self, object: ObjectId, matrix: &DMat4) -> HostResult<()> {
        self.shadow.set_world_matrix(object, matrix)?;
        let var = self.object_var(object)?;
        self.emit(format!("{var}.matrix_world = {}", py_matrix(matrix)));
        Ok(())
    }

    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> HostResult<()> {
        self.shadow.set_parent(child, parent)?;
        let child_var = self.object_var(child)?;
        let parent_var = self.object_var(parent)?;
        self.emit(format!("{child_var}.parent = {parent_var}"));
        Ok(())
    }

    fn link_into_scene(&mut self, object: ObjectId) -> HostResult<()> {
        self.shadow.link_into_scene(object)?;
        let var = self.object_var(object)?;
        self.emit(format!("bpy.context.scene.collection.objects.link({var})"));
        Ok(())
    }

    fn set_name(&mut self, object: ObjectId, name: &str) -> HostResult<()> {
        self.shadow.set_name(object, name)?;
        let actual = self.shadow.object_name(object)?;
        let var = self.object_var(object)?;
        self.emit(format!("{var}.name = {}", py_str(&actual)));
        Ok(())
    }

    fn set_template(&mut self, object: ObjectId, template: bool) -> HostResult<()> {
        self.shadow.set_template(object, template)?;
        let var = self.object_var(object)?;
        self.emit(format!("{var}.hide_render = {}", py_bool(template)));
        self.emit(format!("{var}.hide_viewport = {}", py_bool(template)));
        Ok(())
    }

    fn apply_boolean(
        &mut self,
        target: ObjectId,
        operand: ObjectId,
        op: BooleanOp,
    ) -> HostResult<()> {
        self.shadow.apply_boolean(target, operand, op)?;
        let target_var = self.object_var(target)?;
        let operand_var = self.object_var(operand)?;
        let modifier = py_str(BOOLEAN_MODIFIER_NAME);

        self.emit(format!(
            "_mod = {target_var}.modifiers.new(name={modifier}, type='BOOLEAN')"
        ));
        self.emit(format!("_mod.object = {operand_var}"));
        self.emit(format!("_mod.operation = '{}'", op.as_str()));
        self.emit(format!(
            "bpy.ops.object.modifier_apply(modifier={modifier})"
        ));
        Ok(())
    }

    fn create_material(
        &mut self,
        name: &str,
        base_color: Rgba,
        metallic: f64,
    ) -> HostResult<MaterialId> {
        let id = self.shadow.create_material(name, base_color, metallic)?;
        let actual = self
            .shadow
            .material(id)
            .map(|m| m.name.clone())
            .ok_or(HostError::UnknownMaterial(id))?;

        let var = self.bind_material(id);
        let node = py_str(PRINCIPAL_SHADER_NODE);
        self.emit(format!("{var} = bpy.data.materials.new({})", py_str(&actual)));
        self.emit(format!("{var}.use_nodes = True"));
        self.emit(format!(
            "{var}.node_tree.nodes[{node}].inputs['Base Color'].default_value = {}",
            py_rgba(base_color)
        ));
        self.emit(format!(
            "{var}.node_tree.nodes[{node}].inputs['Metallic'].default_value = {}",
            py_float(metallic)
        ));
        Ok(id)
    }

    fn remove_material_if_exists(&mut self, name: &str) -> HostResult<bool> {
        let id = self.shadow.material_by_name(name).map(|(id, _)| id);
        let removed = self.shadow.remove_material_if_exists(name)?;
        if let Some(id) = id {
            self.materials.remove(id);
        }
        // Blender may hold the material from a previous run
        self.emit(format!("_remove_material({})", py_str(name)));
        Ok(removed)
    }

    fn attach_material(&mut self, object: ObjectId, material: MaterialId) -> HostResult<()> {
        self.shadow.attach_material(object, material)?;
        let object_var = self.object_var(object)?;
        let material_var = self.material_var(material)?;
        self.emit(format!("{object_var}.data.materials.append({material_var})"));
        Ok(())
    }

    fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.shadow.find_object(name)
    }

    fn object_name(&self, object: ObjectId) -> HostResult<String> {
        self.shadow.object_name(object)
    }

    fn exists(&self, object: ObjectId) -> bool {
        self.shadow.exists(object)
    }

    fn set_active(&mut self, object: ObjectId) -> HostResult<()> {
        self.shadow.set_active(object)?;
        let var = self.object_var(object)?;
        self.emit(format!("bpy.context.view_layer.objects.active = {var}"));
        Ok(())
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.shadow.active_object()
    }

    fn clear_selection(&mut self) {
        self.shadow.clear_selection();
        self.emit("bpy.ops.object.select_all(action='DESELECT')".to_string());
    }

    fn force_object_mode(&mut self) -> HostResult<()> {
        self.shadow.force_object_mode()?;
        self.emit("bpy.ops.object.mode_set(mode='OBJECT')".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_binds_variable() {
        let mut host = BlenderScriptHost::new();
        let params = PrimitiveParams::new().with("radius", 0.5);
        host.create_primitive(PrimitiveKind::Cylinder, &params)
            .unwrap();

        let lines = host.script().lines();
        assert_eq!(
            lines[0],
            "bpy.ops.mesh.primitive_cylinder_add(radius=0.5, location=(0.0, 0.0, 0.0))"
        );
        assert_eq!(lines[1], "obj_1 = bpy.context.active_object");
    }

    #[test]
    fn test_rejected_call_emits_nothing() {
        let mut host = BlenderScriptHost::new();
        let params = PrimitiveParams::new().with("bogus", 1.0);
        assert!(host.create_primitive(PrimitiveKind::Cube, &params).is_err());
        assert!(host.script().is_empty());
    }

    #[test]
    fn test_boolean_statements() {
        let mut host = BlenderScriptHost::new();
        let target = host.create_mesh_object("Box").unwrap();
        let cube = host
            .create_primitive(PrimitiveKind::Cube, &PrimitiveParams::new())
            .unwrap();
        host.set_active(target).unwrap();
        host.apply_boolean(target, cube, BooleanOp::Difference)
            .unwrap();

        assert!(host
            .script()
            .contains("_mod = obj_1.modifiers.new(name=\"booly\", type='BOOLEAN')"));
        assert!(host.script().contains("_mod.object = obj_2"));
        assert!(host.script().contains("_mod.operation = 'DIFFERENCE'"));
        assert!(host
            .script()
            .contains("bpy.ops.object.modifier_apply(modifier=\"booly\")"));
    }

    #[test]
    fn test_mesh_object_clears_leftover_once() {
        let mut host = BlenderScriptHost::new();
        let first = host.create_mesh_object("Tower").unwrap();
        assert!(host.script().contains("_delete_named(\"Tower\")"));

        let before = host.script().len();
        host.create_mesh_object("Tower").unwrap();
        let added = &host.script().lines()[before..];
        assert!(added.iter().all(|l| !l.starts_with("_delete_named")));
        assert_eq!(added[0], "# Tower.001");
        assert!(added[1].contains("\"Tower.001\""));
        assert!(host.exists(first));
    }

    #[test]
    fn test_delete_forgets_descendants() {
        let mut host = BlenderScriptHost::new();
        let parent = host.create_mesh_object("Parent").unwrap();
        let child = host.create_mesh_object("Child").unwrap();
        host.set_parent(child, parent).unwrap();
        host.delete_object(parent).unwrap();

        assert!(host.script().contains("_delete(obj_1)"));
        assert!(matches!(
            host.set_name(child, "Again"),
            Err(HostError::UnknownObject(_))
        ));
    }

    #[test]
    fn test_material_statements() {
        let mut host = BlenderScriptHost::new();
        let obj = host
            .create_primitive(PrimitiveKind::Cube, &PrimitiveParams::new())
            .unwrap();
        host.remove_material_if_exists("Sand").unwrap();
        let mat = host
            .create_material("Sand", Rgba::rgb(0.8, 0.7, 0.4), 0.0)
            .unwrap();
        host.attach_material(obj, mat).unwrap();

        let script = host.script();
        assert!(script.contains("_remove_material(\"Sand\")"));
        assert!(script.contains("mat_1 = bpy.data.materials.new(\"Sand\")"));
        assert!(script.contains("nodes[\"Principled BSDF\"].inputs['Metallic'].default_value = 0.0"));
        assert!(script.contains("obj_1.data.materials.append(mat_1)"));
    }

    #[test]
    fn test_queries_follow_shadow() {
        let mut host = BlenderScriptHost::new();
        let obj = host
            .create_primitive(PrimitiveKind::Cone, &PrimitiveParams::new())
            .unwrap();
        host.set_name(obj, "Roof").unwrap();

        assert_eq!(host.find_object("Roof"), Some(obj));
        assert_eq!(host.active_object(), Some(obj));
        assert!(host.script().contains("obj_1.name = \"Roof\""));
    }
}
