//! Stable handles into host-owned storage.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a scene object.
    pub struct ObjectId;

    /// Handle to mesh data, possibly shared by several objects.
    pub struct MeshId;

    /// Handle to a material.
    pub struct MaterialId;
}
