//! # Config Crate
//!
//! Centralized configuration constants for the Paragen model pipeline.
//! Naming conventions, host primitive defaults and build limits are defined
//! here so the host, core and model crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{qualified_name, DEFAULT_METALLIC, MAX_BUILD_DEPTH};
//!
//! assert_eq!(qualified_name("Sand Castle", "Sand"), "Sand Castle.Sand");
//! assert_eq!(DEFAULT_METALLIC, 0.0);
//! assert!(MAX_BUILD_DEPTH > 1);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Host Compatible**: Primitive defaults match the host's own defaults
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
