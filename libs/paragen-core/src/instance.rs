//! # Instancer
//!
//! Places lightweight copies of a template under the current frame's object.
//! Copies share the template's mesh, so repeated parts cost one mesh no
//! matter how many times they are placed.
//!
//! ## Example
//!
//! ```rust
//! use paragen::{at, Paragen, TransformSpec};
//! use paragen_scene::{Host, PrimitiveKind, Scene};
//!
//! let mut paragen = Paragen::new(Scene::new());
//! let table = paragen
//!     .build("Table", TransformSpec::new(), |p| {
//!         let leg = p.prim(PrimitiveKind::Cylinder)?;
//!         p.instance("Leg", leg, at(1.0, 1.0, 0.0))?;
//!         p.instance("Leg", leg, at(-1.0, 1.0, 0.0))?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let scene = paragen.host();
//! assert_eq!(scene.children(table).len(), 2);
//! assert!(scene.find_object("Table.Leg").is_some());
//! assert!(scene.find_object("Table.Leg.001").is_some());
//! ```

use log::trace;
use paragen_scene::{Host, ObjectId};

use crate::boolean::Operand;
use crate::error::{BuildError, BuildResult};
use crate::transform::{apply_transform, TransformSpec};
use crate::Paragen;

impl<H: Host> Paragen<H> {
    /// Places a copy of `source` under the active object, named
    /// `"<active name>.<name>"`.
    ///
    /// A primitive source is built first and stays a temporary; the copy
    /// keeps the mesh alive after the temporary is deleted.
    pub fn instance(
        &mut self,
        name: &str,
        source: impl Into<Operand>,
        transform: TransformSpec,
    ) -> BuildResult<ObjectId> {
        let active = self
            .stack
            .current()
            .map(|frame| frame.active)
            .ok_or_else(|| BuildError::no_frame("instance"))?;
        let full_name = self.qualified(name)?;
        let source = self.operand_object(source.into())?;

        let copy = self.host.copy_object(source)?;
        // Copies of a template are placed parts
        self.host.set_template(copy, false)?;
        self.host.set_parent(copy, active)?;
        self.host.link_into_scene(copy)?;
        self.host.set_name(copy, &full_name)?;
        apply_transform(&mut self.host, copy, &transform)?;
        trace!("instance '{full_name}'");
        Ok(copy)
    }

    /// Builds a hidden template named `"<active name>.<name>"` and parents it
    /// under the active object.
    ///
    /// The template is a regular nested build; instance it with
    /// [`Paragen::instance`].
    pub fn template(
        &mut self,
        name: &str,
        routine: impl FnOnce(&mut Self) -> BuildResult<()>,
    ) -> BuildResult<ObjectId> {
        let full_name = self.qualified(name)?;
        let template = self.build(&full_name, TransformSpec::new(), routine)?;
        self.host.set_template(template, true)?;
        self.adopt(template)?;
        Ok(template)
    }

    /// Parents a finished object under the active object, keeping its local
    /// transform.
    pub fn adopt(&mut self, child: ObjectId) -> BuildResult<()> {
        let active = self.active()?;
        self.host.set_parent(child, active)?;
        Ok(())
    }

    /// Deletes objects (with their children) before the frame pops.
    ///
    /// Already-deleted objects are skipped.
    pub fn delete(&mut self, objects: &[ObjectId]) -> BuildResult<()> {
        self.host.clear_selection();
        for object in objects {
            if self.host.exists(*object) {
                self.host.delete_object(*object)?;
            }
        }
        Ok(())
    }
}
