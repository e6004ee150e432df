//! # Build Errors
//!
//! Error types for model construction.

use paragen_scene::HostError;
use thiserror::Error;

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while composing a model.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Composition call made outside any build frame.
    #[error("No active build frame: {operation} must run inside a build or scoped context")]
    NoActiveFrame { operation: String },

    /// Nesting exceeded the configured limit.
    #[error("Build nesting exceeds {limit} frames")]
    DepthExceeded { limit: usize },

    /// Host rejected an operation.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Model-level failure reported by a build routine.
    #[error("Model '{name}' failed: {message}")]
    Model { name: String, message: String },
}

impl BuildError {
    /// Creates a no-active-frame error.
    pub fn no_frame(operation: impl Into<String>) -> Self {
        Self::NoActiveFrame {
            operation: operation.into(),
        }
    }

    /// Creates a model error.
    pub fn model(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Model {
            name: name.into(),
            message: message.into(),
        }
    }
}
