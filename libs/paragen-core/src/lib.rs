//! # Paragen
//!
//! Procedural models from primitive solids and baked boolean operations,
//! driven through an abstract 3D content host.
//!
//! ## Architecture
//!
//! ```text
//! build / build_model
//!   └─ frame (context stack)
//!        ├─ prim      → temporary primitive
//!        ├─ boolean   → baked into the frame's object
//!        ├─ material  → namespaced, attached to the frame's object
//!        └─ instance  → shared-mesh copy parented to the frame's object
//! ```
//!
//! [`Paragen`] owns the host and the frame stack. Every composition call
//! needs a current frame; outside one it fails with
//! [`BuildError::NoActiveFrame`].
//!
//! ## Usage
//!
//! ```rust
//! use paragen::{at, Paragen, PrimSpec, TransformSpec};
//! use paragen_scene::{Host, PrimitiveKind, Scene};
//!
//! let mut paragen = Paragen::new(Scene::new());
//! let tower = paragen
//!     .build("T1", TransformSpec::new(), |p| {
//!         p.union(PrimitiveKind::Cylinder, TransformSpec::new())?;
//!         p.union(PrimitiveKind::Cone, at(0.0, 0.0, 2.0))?;
//!         p.difference(PrimSpec::new(PrimitiveKind::Cube).param("size", 0.5), TransformSpec::new())
//!     })
//!     .unwrap();
//!
//! assert_eq!(paragen.host().object_count(), 1);
//! assert_eq!(paragen.host().object_name(tower).unwrap(), "T1");
//! ```

pub mod boolean;
pub mod builder;
pub mod context;
pub mod error;
pub mod instance;
pub mod material;
pub mod primitive;
pub mod transform;

pub use boolean::Operand;
pub use builder::Model;
pub use context::{BuildFrame, BuildStack, FrameGuard};
pub use error::{BuildError, BuildResult};
pub use primitive::PrimSpec;
pub use transform::{apply_transform, at, Channel, TransformSpec};

use paragen_scene::Host;

/// Build coordinator: a host plus the stack of open build frames.
#[derive(Debug, Default)]
pub struct Paragen<H: Host> {
    host: H,
    stack: BuildStack,
}

impl<H: Host> Paragen<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            stack: BuildStack::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct host access.
    ///
    /// Edits made here bypass frame bookkeeping.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn stack(&self) -> &BuildStack {
        &self.stack
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }
}
