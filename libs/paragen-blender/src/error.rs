//! Error types for the Blender backend.

use paragen_scene::HostError;
use thiserror::Error;

/// Result type for Blender backend operations.
pub type BlenderResult<T> = Result<T, BlenderError>;

/// Errors that can occur while running generated scripts in Blender.
#[derive(Debug, Error)]
pub enum BlenderError {
    /// Blender executable not found.
    #[error("Blender executable not found. Ensure Blender is installed and in PATH, or set BLENDER_PATH environment variable")]
    NotFound,

    /// Failed to spawn Blender process.
    #[error("Failed to spawn Blender process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Blender process timed out.
    #[error("Blender process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Blender process exited with non-zero status.
    #[error("Blender process exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Failed to write the generated script.
    #[error("Failed to write script file: {0}")]
    WriteScriptFailed(#[source] std::io::Error),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The shadow scene rejected an operation.
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

impl BlenderError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Stable error code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            BlenderError::NotFound => "BLENDER_001",
            BlenderError::SpawnFailed(_) => "BLENDER_002",
            BlenderError::Timeout { .. } => "BLENDER_003",
            BlenderError::ProcessFailed { .. } => "BLENDER_004",
            BlenderError::WriteScriptFailed(_) => "BLENDER_005",
            BlenderError::Io(_) => "BLENDER_006",
            BlenderError::Host(_) => "BLENDER_007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_failed_display() {
        let err = BlenderError::process_failed(1, "Traceback");
        assert_eq!(
            err.to_string(),
            "Blender process exited with status 1: Traceback"
        );
        assert_eq!(err.code(), "BLENDER_004");
    }

    #[test]
    fn test_host_error_converts() {
        let err: BlenderError = HostError::edit_mode("apply a modifier").into();
        assert_eq!(err.code(), "BLENDER_007");
    }
}
