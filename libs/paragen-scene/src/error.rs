//! # Host Errors
//!
//! Error types for host scene operations.

use thiserror::Error;

use crate::ids::{MaterialId, ObjectId};

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors a host can report back to the build core.
#[derive(Debug, Error)]
pub enum HostError {
    /// Handle does not refer to a live object.
    #[error("Unknown object: {0:?}")]
    UnknownObject(ObjectId),

    /// Handle does not refer to a live material.
    #[error("Unknown material: {0:?}")]
    UnknownMaterial(MaterialId),

    /// Primitive constructor rejected a parameter.
    #[error("Invalid parameter '{name}' for primitive '{kind}': {reason}")]
    InvalidParameter {
        kind: String,
        name: String,
        reason: String,
    },

    /// Primitive name not known to the host.
    #[error("Unknown primitive kind: {0}")]
    UnknownPrimitive(String),

    /// Object carries no mesh data.
    #[error("Object '{name}' has no mesh data")]
    NoMesh { name: String },

    /// Operation requires the object to be the active object.
    #[error("Object '{name}' must be active for {operation}")]
    NotActive { name: String, operation: String },

    /// Operation is not allowed while in edit mode.
    #[error("Cannot {operation} while in edit mode")]
    EditMode { operation: String },

    /// Mode switch requested with nothing active.
    #[error("No active object for {operation}")]
    NoActiveObject { operation: String },

    /// Mesh data is shared and cannot be modified in place.
    #[error("Cannot apply modifier to '{name}': mesh data has {users} users")]
    MultiUserData { name: String, users: usize },

    /// Boolean operand refers to the target itself.
    #[error("Object '{name}' cannot be combined with itself")]
    SelfReference { name: String },

    /// Transform contains NaN or infinite components.
    #[error("Non-finite transform for object '{name}'")]
    InvalidTransform { name: String },

    /// Parenting would introduce a loop.
    #[error("Parenting '{child}' to '{parent}' would create a cycle")]
    ParentCycle { child: String, parent: String },

    /// Scene export failed.
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl HostError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(
        kind: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            kind: kind.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not-active error.
    pub fn not_active(name: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::NotActive {
            name: name.into(),
            operation: operation.into(),
        }
    }

    /// Creates an edit-mode error.
    pub fn edit_mode(operation: impl Into<String>) -> Self {
        Self::EditMode {
            operation: operation.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HostError::invalid_parameter("cube", "radius", "unknown parameter");
        let text = err.to_string();
        assert!(text.contains("radius"));
        assert!(text.contains("cube"));
    }

    #[test]
    fn test_multi_user_display() {
        let err = HostError::MultiUserData {
            name: "Leg".to_string(),
            users: 4,
        };
        assert!(err.to_string().contains("4 users"));
    }
}
