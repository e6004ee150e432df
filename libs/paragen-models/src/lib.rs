//! # Paragen Models
//!
//! Procedural models built from the Paragen composition core, plus the demo
//! scene that places them.
//!
//! Every model is a parameter struct implementing [`paragen::Model`] with
//! defaults matching its reference dimensions.
//!
//! ## Usage
//!
//! ```rust
//! use paragen::{at, Paragen};
//! use paragen_models::SandCastle;
//! use paragen_scene::Scene;
//!
//! let mut paragen = Paragen::new(Scene::new());
//! let castle = paragen
//!     .build_model("Sand Castle", at(0.0, 50.0, 0.0), &SandCastle::default())
//!     .unwrap();
//! assert!(paragen.host().geometry_of(castle).unwrap().boolean_count() > 0);
//! ```

pub mod cactus;
pub mod castle;
pub mod props;
pub mod scene;
pub mod scorpion;
pub mod water;

pub use cactus::{cactus_drink_2, CactusDrink, CactusDrinkPair};
pub use castle::SandCastle;
pub use props::{PicketFence, Table, Tower};
pub use scene::{build_demo_scene, DemoScene};
pub use scorpion::SadScorpionAttempt;
pub use water::Water;
