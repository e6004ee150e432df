//! Handle-free view of a scene, comparable across independent runs.

use serde::Serialize;

use crate::geometry::Geometry;
use crate::material::Material;
use crate::transform::Transform;

/// Everything observable about a scene, keyed by name instead of handle.
///
/// Two scenes built by the same sequence of calls produce equal snapshots
/// even though their handles differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    /// Objects sorted by name.
    pub objects: Vec<ObjectSnapshot>,
    /// Materials sorted by name.
    pub materials: Vec<Material>,
    /// Number of live mesh datablocks.
    pub mesh_count: usize,
}

impl SceneSnapshot {
    pub fn object(&self, name: &str) -> Option<&ObjectSnapshot> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn object_names(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.name.as_str()).collect()
    }
}

/// One object of a [`SceneSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSnapshot {
    pub name: String,
    pub parent: Option<String>,
    pub transform: Transform,
    pub linked: bool,
    pub template: bool,
    pub mesh: Option<String>,
    pub geometry: Option<Geometry>,
    pub materials: Vec<String>,
}
