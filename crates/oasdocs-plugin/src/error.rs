//! Plugin error types.

use std::path::PathBuf;

use oasdocs_spec::SpecError;

/// Error produced by the plugin lifecycle.
///
/// Absent input (unset spec path, missing file) and empty parsed content
/// are modeled as successful no-ops, never as errors. Everything here is
/// build-fatal and propagates to the orchestrator unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// OpenAPI document loading failed.
    #[error("{0}")]
    Spec(#[from] SpecError),

    /// I/O error writing a generated data artifact.
    #[error("I/O error writing {}: {source}", .path.display())]
    Io {
        /// Artifact path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Artifact serialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid plugin options.
    #[error("Invalid plugin options: {0}")]
    Options(String),
}
