//! Tests for the in-memory scene.

use super::*;
use approx::assert_relative_eq;
use glam::DVec3;

fn cube(scene: &mut Scene) -> ObjectId {
    scene
        .create_primitive(PrimitiveKind::Cube, &PrimitiveParams::new())
        .unwrap()
}

// =============================================================================
// NAMING
// =============================================================================

#[test]
fn test_primitive_names_get_suffixes() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let b = cube(&mut scene);
    let c = cube(&mut scene);

    assert_eq!(scene.object_name(a).unwrap(), "Cube");
    assert_eq!(scene.object_name(b).unwrap(), "Cube.001");
    assert_eq!(scene.object_name(c).unwrap(), "Cube.002");
}

#[test]
fn test_rename_keeps_own_name() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    scene.set_name(a, "Cube").unwrap();
    assert_eq!(scene.object_name(a).unwrap(), "Cube");
}

#[test]
fn test_rename_clash_strips_existing_suffix() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let b = cube(&mut scene);
    scene.set_name(a, "Wall").unwrap();
    scene.set_name(b, "Wall.001").unwrap();
    let c = cube(&mut scene);
    scene.set_name(c, "Wall.001").unwrap();
    assert_eq!(scene.object_name(c).unwrap(), "Wall.002");
}

#[test]
fn test_find_object() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    assert_eq!(scene.find_object("Cube"), Some(a));
    assert_eq!(scene.find_object("Missing"), None);
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn test_create_primitive_is_active_and_linked() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    assert_eq!(scene.active_object(), Some(a));
    assert_eq!(scene.selected(), &[a]);
    assert!(scene.object(a).unwrap().linked);
}

#[test]
fn test_create_primitive_rejects_unknown_parameter() {
    let mut scene = Scene::new();
    let result = scene.create_primitive(
        PrimitiveKind::Cube,
        &PrimitiveParams::new().with("radius", 1.0),
    );
    assert!(matches!(result, Err(HostError::InvalidParameter { .. })));
    assert_eq!(scene.object_count(), 0);
}

#[test]
fn test_create_primitive_in_edit_mode_fails() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    scene.enter_edit_mode(a).unwrap();
    let result = scene.create_primitive(PrimitiveKind::Cube, &PrimitiveParams::new());
    assert!(matches!(result, Err(HostError::EditMode { .. })));

    scene.force_object_mode().unwrap();
    assert_eq!(scene.mode(), Mode::Object);
    assert!(scene.create_primitive(PrimitiveKind::Cube, &PrimitiveParams::new()).is_ok());
}

#[test]
fn test_force_object_mode_requires_active() {
    let mut scene = Scene::new();
    assert!(matches!(
        scene.force_object_mode(),
        Err(HostError::NoActiveObject { .. })
    ));
}

#[test]
fn test_mesh_object_is_empty_and_unlinked() {
    let mut scene = Scene::new();
    let id = scene.create_mesh_object("Tower").unwrap();
    let object = scene.object(id).unwrap();
    assert!(!object.linked);
    assert_eq!(scene.mesh_of(id).unwrap().name, "Tower");
    assert!(scene.geometry_of(id).unwrap().is_empty());
}

#[test]
fn test_copy_shares_mesh() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let b = scene.copy_object(a).unwrap();

    assert_eq!(scene.object(a).unwrap().mesh, scene.object(b).unwrap().mesh);
    assert_eq!(scene.mesh_count(), 1);
    assert!(!scene.object(b).unwrap().linked);
    assert_eq!(scene.object_name(b).unwrap(), "Cube.001");
}

#[test]
fn test_delete_releases_mesh_after_last_user() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let b = scene.copy_object(a).unwrap();

    scene.delete_object(a).unwrap();
    assert_eq!(scene.mesh_count(), 1);
    scene.delete_object(b).unwrap();
    assert_eq!(scene.mesh_count(), 0);
    assert_eq!(scene.active_object(), None);
}

#[test]
fn test_delete_cascades_to_children() {
    let mut scene = Scene::new();
    let parent = scene.create_mesh_object("Parent").unwrap();
    let child = cube(&mut scene);
    scene.set_parent(child, parent).unwrap();

    scene.delete_object(parent).unwrap();
    assert!(!scene.exists(child));
    assert_eq!(scene.object_count(), 0);
}

#[test]
fn test_delete_unknown_object_fails() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    scene.delete_object(a).unwrap();
    assert!(matches!(
        scene.delete_object(a),
        Err(HostError::UnknownObject(_))
    ));
}

// =============================================================================
// PLACEMENT
// =============================================================================

#[test]
fn test_world_matrix_follows_parent() {
    let mut scene = Scene::new();
    let parent = scene.create_mesh_object("Parent").unwrap();
    let child = cube(&mut scene);
    scene
        .set_transform(parent, &Transform::from_position(DVec3::new(0.0, 10.0, 0.0)))
        .unwrap();
    scene
        .set_transform(child, &Transform::from_position(DVec3::new(1.0, 0.0, 0.0)))
        .unwrap();
    scene.set_parent(child, parent).unwrap();

    let origin = scene
        .world_matrix(child)
        .unwrap()
        .transform_point3(DVec3::ZERO);
    assert_relative_eq!(origin.x, 1.0);
    assert_relative_eq!(origin.y, 10.0);
}

#[test]
fn test_set_world_matrix_under_parent() {
    let mut scene = Scene::new();
    let parent = scene.create_mesh_object("Parent").unwrap();
    let child = cube(&mut scene);
    scene
        .set_transform(parent, &Transform::from_position(DVec3::new(5.0, 0.0, 0.0)))
        .unwrap();
    scene.set_parent(child, parent).unwrap();

    scene.set_world_matrix(child, &DMat4::IDENTITY).unwrap();
    let local = scene.transform(child).unwrap();
    assert_relative_eq!(local.position.x, -5.0, epsilon = 1e-9);
}

#[test]
fn test_non_finite_transform_rejected() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let bad = Transform::from_position(DVec3::new(f64::NAN, 0.0, 0.0));
    assert!(matches!(
        scene.set_transform(a, &bad),
        Err(HostError::InvalidTransform { .. })
    ));
}

#[test]
fn test_parent_cycle_rejected() {
    let mut scene = Scene::new();
    let a = scene.create_mesh_object("A").unwrap();
    let b = scene.create_mesh_object("B").unwrap();
    scene.set_parent(b, a).unwrap();
    assert!(matches!(
        scene.set_parent(a, b),
        Err(HostError::ParentCycle { .. })
    ));
    assert!(matches!(
        scene.set_parent(a, a),
        Err(HostError::ParentCycle { .. })
    ));
}

#[test]
fn test_reparent_moves_child() {
    let mut scene = Scene::new();
    let a = scene.create_mesh_object("A").unwrap();
    let b = scene.create_mesh_object("B").unwrap();
    let c = cube(&mut scene);
    scene.set_parent(c, a).unwrap();
    scene.set_parent(c, b).unwrap();
    assert!(scene.children(a).is_empty());
    assert_eq!(scene.children(b), &[c]);
}

// =============================================================================
// BOOLEANS
// =============================================================================

#[test]
fn test_boolean_requires_active_target() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let b = cube(&mut scene);
    let result = scene.apply_boolean(a, b, BooleanOp::Union);
    assert!(matches!(result, Err(HostError::NotActive { .. })));
}

#[test]
fn test_boolean_rejects_self() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let result = scene.apply_boolean(a, a, BooleanOp::Union);
    assert!(matches!(result, Err(HostError::SelfReference { .. })));
}

#[test]
fn test_boolean_rejects_shared_mesh() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let _copy = scene.copy_object(a).unwrap();
    let b = cube(&mut scene);
    scene.set_active(a).unwrap();
    let result = scene.apply_boolean(a, b, BooleanOp::Union);
    assert!(matches!(
        result,
        Err(HostError::MultiUserData { users: 2, .. })
    ));
}

#[test]
fn test_union_into_empty_takes_operand_in_local_space() {
    let mut scene = Scene::new();
    let target = scene.create_mesh_object("Target").unwrap();
    scene
        .set_transform(target, &Transform::from_position(DVec3::new(10.0, 0.0, 0.0)))
        .unwrap();
    let operand = cube(&mut scene);

    scene.set_active(target).unwrap();
    scene.apply_boolean(target, operand, BooleanOp::Union).unwrap();

    let bounds = scene.world_bounds(target).unwrap().unwrap();
    assert_relative_eq!(bounds.min.x, -1.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.max.x, 1.0, epsilon = 1e-9);

    let local = scene.geometry_of(target).unwrap().bounds().unwrap();
    assert_relative_eq!(local.center().x, -10.0, epsilon = 1e-9);
}

#[test]
fn test_difference_records_boolean_node() {
    let mut scene = Scene::new();
    let base = cube(&mut scene);
    let hole = scene
        .create_primitive(PrimitiveKind::Cylinder, &PrimitiveParams::new())
        .unwrap();
    scene.set_active(base).unwrap();
    scene.apply_boolean(base, hole, BooleanOp::Difference).unwrap();

    let geometry = scene.geometry_of(base).unwrap();
    assert_eq!(geometry.boolean_count(), 1);
    assert_eq!(geometry.primitive_count(), 2);
    assert!(scene.exists(hole));
}

#[test]
fn test_boolean_with_open_surface_is_accepted() {
    let mut scene = Scene::new();
    let target = scene.create_mesh_object("Disc").unwrap();
    let circle = scene
        .create_primitive(
            PrimitiveKind::Circle,
            &PrimitiveParams::new().with("fill_type", "TRIFAN"),
        )
        .unwrap();
    scene.set_active(target).unwrap();
    scene.apply_boolean(target, circle, BooleanOp::Union).unwrap();
    assert!(!scene.geometry_of(target).unwrap().is_closed());
}

#[test]
fn test_boolean_merges_operand_materials() {
    let mut scene = Scene::new();
    let target = scene.create_mesh_object("Target").unwrap();
    let operand = cube(&mut scene);
    let red = scene
        .create_material("Red", Rgba::rgb(1.0, 0.0, 0.0), 0.0)
        .unwrap();
    scene.attach_material(operand, red).unwrap();

    scene.set_active(target).unwrap();
    scene.apply_boolean(target, operand, BooleanOp::Union).unwrap();
    scene.apply_boolean(target, operand, BooleanOp::Union).unwrap();

    assert_eq!(scene.material_names(target), vec!["Red".to_string()]);
}

// =============================================================================
// MATERIALS
// =============================================================================

#[test]
fn test_material_names_are_unique() {
    let mut scene = Scene::new();
    scene.create_material("Sand", Rgba::WHITE, 0.0).unwrap();
    let second = scene.create_material("Sand", Rgba::WHITE, 0.0).unwrap();
    assert_eq!(scene.material(second).unwrap().name, "Sand.001");
}

#[test]
fn test_remove_material_detaches_slots() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let sand = scene.create_material("Sand", Rgba::WHITE, 0.0).unwrap();
    scene.attach_material(a, sand).unwrap();

    assert!(scene.remove_material_if_exists("Sand").unwrap());
    assert!(!scene.remove_material_if_exists("Sand").unwrap());
    assert!(scene.material_names(a).is_empty());
    assert_eq!(scene.material_count(), 0);
}

#[test]
fn test_attach_unknown_material_fails() {
    let mut scene = Scene::new();
    let a = cube(&mut scene);
    let sand = scene.create_material("Sand", Rgba::WHITE, 0.0).unwrap();
    scene.remove_material_if_exists("Sand").unwrap();
    assert!(matches!(
        scene.attach_material(a, sand),
        Err(HostError::UnknownMaterial(_))
    ));
}

// =============================================================================
// EXPORT
// =============================================================================

#[test]
fn test_snapshot_is_handle_free() {
    let build = || {
        let mut scene = Scene::new();
        let parent = scene.create_mesh_object("Parent").unwrap();
        let child = cube(&mut scene);
        scene.set_parent(child, parent).unwrap();
        scene.snapshot()
    };
    let first = build();
    assert_eq!(first, build());
    assert_eq!(first.object_names(), vec!["Cube", "Parent"]);
    assert_eq!(
        first.object("Cube").unwrap().parent.as_deref(),
        Some("Parent")
    );
}

#[test]
fn test_to_json() {
    let mut scene = Scene::new();
    cube(&mut scene);
    let json = scene.to_json().unwrap();
    assert!(json.contains("\"Cube\""));
    assert!(json.contains("mesh_count"));
}
