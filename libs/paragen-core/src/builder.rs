//! # Model Builder
//!
//! The fixed lifecycle wrapped around every model:
//!
//! 1. Force object mode and clear the selection
//! 2. Delete any existing object of the same name, with its children
//! 3. Create an empty mesh object, link it, place it, make it active
//! 4. Push a frame for it
//! 5. Run the routine (which may nest further builds)
//! 6. Pop the frame, also when the routine fails
//! 7. Return the finished object
//!
//! Rebuilding under the same name therefore replaces the previous result.

use log::debug;
use paragen_scene::{Host, ObjectId};

use crate::error::BuildResult;
use crate::transform::{apply_transform, TransformSpec};
use crate::Paragen;

/// A parameterized model.
///
/// The struct holds the model's parameters; [`Model::compose`] issues the
/// composition calls inside the model's frame.
///
/// ## Example
///
/// ```rust
/// use paragen::{at, BuildResult, Model, Paragen, TransformSpec};
/// use paragen_scene::{Host, PrimitiveKind, Scene};
///
/// struct Pillar {
///     height: f64,
/// }
///
/// impl Model for Pillar {
///     fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
///         p.union(
///             paragen::PrimSpec::new(PrimitiveKind::Cylinder).param("depth", self.height),
///             at(0.0, 0.0, self.height / 2.0),
///         )
///     }
/// }
///
/// let mut paragen = Paragen::new(Scene::new());
/// let pillar = paragen
///     .build_model("Pillar", TransformSpec::new(), &Pillar { height: 3.0 })
///     .unwrap();
/// assert_eq!(paragen.host().object_name(pillar).unwrap(), "Pillar");
/// ```
pub trait Model {
    fn compose<H: Host>(&self, paragen: &mut Paragen<H>) -> BuildResult<()>;
}

impl<H: Host> Paragen<H> {
    /// Builds a named object from `routine`.
    ///
    /// Routine errors propagate after the frame pops; whatever was built so
    /// far stays in the scene.
    pub fn build(
        &mut self,
        name: &str,
        transform: TransformSpec,
        routine: impl FnOnce(&mut Self) -> BuildResult<()>,
    ) -> BuildResult<ObjectId> {
        debug!("build '{name}' (depth {})", self.stack.depth());

        if self.host.active_object().is_some() {
            self.host.force_object_mode()?;
        }
        self.host.clear_selection();

        if let Some(previous) = self.host.find_object(name) {
            debug!("replacing existing '{name}'");
            self.host.delete_object(previous)?;
        }

        let root = self.host.create_mesh_object(name)?;
        self.host.link_into_scene(root)?;
        apply_transform(&mut self.host, root, &transform)?;
        self.host.set_active(root)?;

        self.scoped(root, routine)?;
        debug!("built '{name}'");
        Ok(root)
    }

    /// Builds a [`Model`] under `name`.
    pub fn build_model<M: Model>(
        &mut self,
        name: &str,
        transform: TransformSpec,
        model: &M,
    ) -> BuildResult<ObjectId> {
        self.build(name, transform, |paragen| model.compose(paragen))
    }
}
