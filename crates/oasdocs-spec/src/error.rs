//! Loader error types.

use std::path::PathBuf;

/// Error produced while loading or normalizing an OpenAPI document.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// I/O error reading the document.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Path of the document being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is not a recognized OpenAPI document format.
    #[error("Unsupported spec extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),
}
