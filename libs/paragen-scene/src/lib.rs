//! # Paragen Scene
//!
//! The host side of Paragen: the [`Host`] contract the build core drives,
//! the vocabulary shared by every host, and [`Scene`], an in-memory host
//! that records geometry as a CSG expression tree.
//!
//! ## Architecture
//!
//! ```text
//! paragen (build core) → Host trait → Scene (in-memory)
//!                                   → BlenderScriptHost (paragen-blender)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use paragen_scene::{Host, PrimitiveKind, PrimitiveParams, Scene};
//!
//! let mut scene = Scene::new();
//! let id = scene
//!     .create_primitive(PrimitiveKind::Cylinder, &PrimitiveParams::new().with("radius", 0.5))
//!     .unwrap();
//! assert_eq!(scene.object_name(id).unwrap(), "Cylinder");
//! ```

pub mod error;
pub mod geometry;
pub mod host;
pub mod ids;
pub mod material;
pub mod primitive;
pub mod scene;
pub mod transform;

pub use error::{HostError, HostResult};
pub use geometry::{Aabb, BooleanOp, Geometry};
pub use host::Host;
pub use ids::{MaterialId, MeshId, ObjectId};
pub use material::{Material, Rgba};
pub use primitive::{ParamDef, ParamSpec, ParamValue, PrimitiveKind, PrimitiveParams};
pub use scene::{Mesh, Mode, Object, ObjectSnapshot, Scene, SceneSnapshot};
pub use transform::Transform;
