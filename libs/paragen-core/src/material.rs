//! # Material Registry
//!
//! Namespaced materials on the current frame's object. A material is named
//! `"<active name>.<name>"`; defining it again replaces the old one, so
//! rebuilding a model never accumulates stale materials.

use config::constants::DEFAULT_METALLIC;
use log::trace;
use paragen_scene::{Host, MaterialId, Rgba};

use crate::error::{BuildError, BuildResult};
use crate::Paragen;

impl<H: Host> Paragen<H> {
    /// Defines a non-metallic material and appends it to the active object's
    /// slots.
    pub fn material(
        &mut self,
        name: &str,
        base_color: impl Into<Rgba>,
    ) -> BuildResult<MaterialId> {
        self.metallic_material(name, base_color, DEFAULT_METALLIC)
    }

    /// Defines a material with a metallic factor.
    ///
    /// Color channels and `metallic` are clamped to `[0, 1]`. The returned id
    /// can be passed to [`crate::PrimSpec::material`].
    pub fn metallic_material(
        &mut self,
        name: &str,
        base_color: impl Into<Rgba>,
        metallic: f64,
    ) -> BuildResult<MaterialId> {
        let active = self
            .stack
            .current()
            .map(|frame| frame.active)
            .ok_or_else(|| BuildError::no_frame("material"))?;
        let full_name = self.qualified(name)?;

        let metallic = if metallic.is_nan() {
            0.0
        } else {
            metallic.clamp(0.0, 1.0)
        };
        if self.host.remove_material_if_exists(&full_name)? {
            trace!("replacing material '{full_name}'");
        }
        let base_color = base_color.into().clamped();
        let material = self.host.create_material(&full_name, base_color, metallic)?;
        self.host.attach_material(active, material)?;
        Ok(material)
    }
}
