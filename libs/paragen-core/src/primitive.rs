//! # Primitive Factory
//!
//! Creates host primitives as temporaries of the current frame.

use log::trace;
use paragen_scene::{Host, MaterialId, ObjectId, ParamValue, PrimitiveKind, PrimitiveParams};

use crate::error::{BuildError, BuildResult};
use crate::transform::{apply_transform, TransformSpec};
use crate::Paragen;

/// Description of a primitive to build.
///
/// ## Example
///
/// ```rust
/// use paragen::{at, PrimSpec};
/// use paragen_scene::PrimitiveKind;
///
/// let spec = PrimSpec::new(PrimitiveKind::Cylinder)
///     .param("radius", 0.25)
///     .param("depth", 2.0)
///     .transform(at(1.5, 0.0, 1.0));
/// assert_eq!(spec.params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrimSpec {
    pub kind: PrimitiveKind,
    /// Forwarded verbatim to the host constructor.
    pub params: PrimitiveParams,
    pub material: Option<MaterialId>,
    pub transform: TransformSpec,
}

impl PrimSpec {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            params: PrimitiveParams::new(),
            material: None,
            transform: TransformSpec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn params(mut self, params: PrimitiveParams) -> Self {
        self.params = params;
        self
    }

    pub fn material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    pub fn transform(mut self, transform: TransformSpec) -> Self {
        self.transform = transform;
        self
    }
}

impl From<PrimitiveKind> for PrimSpec {
    fn from(kind: PrimitiveKind) -> Self {
        PrimSpec::new(kind)
    }
}

impl<H: Host> Paragen<H> {
    /// Builds a primitive, places it, attaches its material and registers it
    /// for cleanup when the current frame pops.
    ///
    /// The host makes the new object active; callers must not rely on that.
    pub fn prim(&mut self, spec: impl Into<PrimSpec>) -> BuildResult<ObjectId> {
        let spec = spec.into();
        if self.stack.is_empty() {
            return Err(BuildError::no_frame("prim"));
        }

        let object = self.host.create_primitive(spec.kind, &spec.params)?;
        self.register_temporary(object)?;

        apply_transform(&mut self.host, object, &spec.transform)?;
        if let Some(material) = spec.material {
            self.host.attach_material(object, material)?;
        }
        trace!("prim {} ({} params)", spec.kind, spec.params.len());
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::at;
    use glam::DVec3;
    use paragen_scene::{HostError, Rgba, Scene};

    fn with_frame<R>(routine: impl FnOnce(&mut Paragen<Scene>) -> BuildResult<R>) -> R {
        let mut paragen = Paragen::new(Scene::new());
        let root = paragen.host_mut().create_mesh_object("Root").unwrap();
        let mut frame = paragen.enter(root).unwrap();
        routine(&mut *frame).unwrap()
    }

    #[test]
    fn test_prim_outside_frame_fails() {
        let mut paragen = Paragen::new(Scene::new());
        let result = paragen.prim(PrimitiveKind::Cube);
        assert!(matches!(result, Err(BuildError::NoActiveFrame { .. })));
        assert_eq!(paragen.host().object_count(), 0);
    }

    #[test]
    fn test_prim_registers_and_places() {
        with_frame(|p| {
            let id = p.prim(PrimSpec::new(PrimitiveKind::Cube).transform(at(1.0, 2.0, 3.0)))?;
            assert_eq!(p.temporaries()?, &[id]);
            assert_eq!(p.host().transform(id)?.position, DVec3::new(1.0, 2.0, 3.0));
            Ok(())
        });
    }

    #[test]
    fn test_prim_attaches_material() {
        with_frame(|p| {
            let red = p.material("Red", Rgba::rgb(1.0, 0.0, 0.0))?;
            let id = p.prim(PrimSpec::new(PrimitiveKind::Cube).material(red))?;
            assert_eq!(p.host().material_names(id), vec!["Root.Red".to_string()]);
            Ok(())
        });
    }

    #[test]
    fn test_prim_forwards_host_rejection() {
        with_frame(|p| {
            let result = p.prim(PrimSpec::new(PrimitiveKind::Cube).param("vertices", 8));
            assert!(matches!(
                result,
                Err(BuildError::Host(HostError::InvalidParameter { .. }))
            ));
            Ok(())
        });
    }
}
