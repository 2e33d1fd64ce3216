//! CLI error types.

use oasdocs_plugin::PluginError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Plugin(#[from] PluginError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Manifest serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
