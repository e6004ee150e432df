//! # Paragen Blender
//!
//! Blender backend for Paragen.
//!
//! - [`BlenderScriptHost`]: a [`Host`](paragen_scene::Host) that turns every
//!   build call into `bpy` Python while tracking the expected result in a
//!   shadow [`Scene`](paragen_scene::Scene)
//! - [`BlenderRunner`]: executes the generated script in headless Blender
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paragen::{at, Paragen};
//! use paragen_blender::{BlenderRunner, BlenderScriptHost};
//! use paragen_scene::PrimitiveKind;
//!
//! let mut paragen = Paragen::new(BlenderScriptHost::new());
//! paragen
//!     .build("Box", at(0.0, 0.0, 1.0), |p| p.union(PrimitiveKind::Cube, at(0.0, 0.0, 0.0)))
//!     .unwrap();
//!
//! let script = paragen.into_host().into_script();
//! BlenderRunner::new().run_script(&script).unwrap();
//! ```

pub mod error;
pub mod host;
pub mod runner;
pub mod script;

pub use error::{BlenderError, BlenderResult};
pub use host::BlenderScriptHost;
pub use runner::{BlenderRunner, RunReport, RunnerConfig};
pub use script::PythonScript;
