//! OpenAPI document loading.
//!
//! Reads a specification file from disk, parses it as YAML or JSON based
//! on the file extension, and normalizes it into [`LoadedContent`].

use std::path::Path;

use crate::document::RawDocument;
use crate::error::SpecError;
use crate::normalize::{LoadOptions, Normalizer};
use crate::types::LoadedContent;

/// Supported specification file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecFormat {
    /// YAML document (`.yaml` / `.yml`).
    Yaml,
    /// JSON document (`.json`).
    Json,
}

impl SpecFormat {
    /// Detect the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnsupportedExtension`] for anything other than
    /// `.yaml`, `.yml`, or `.json`.
    pub fn from_path(path: &Path) -> Result<Self, SpecError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(SpecError::UnsupportedExtension(path.to_path_buf())),
        }
    }
}

/// Load and normalize an OpenAPI document from a file.
///
/// # Errors
///
/// Returns [`SpecError`] if the file cannot be read, has an unsupported
/// extension, or fails to parse. A document with zero operations is not an
/// error; it loads as empty content.
pub fn load_spec(path: &Path, options: &LoadOptions) -> Result<LoadedContent, SpecError> {
    let format = SpecFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = parse_spec(&content, format, options)?;
    tracing::debug!(
        path = %path.display(),
        sections = loaded.sections.len(),
        items = loaded.item_count(),
        "Loaded OpenAPI document"
    );
    Ok(loaded)
}

/// Parse and normalize an OpenAPI document from a string.
///
/// # Errors
///
/// Returns [`SpecError::Yaml`] or [`SpecError::Json`] on parse failure.
pub fn parse_spec(
    content: &str,
    format: SpecFormat,
    options: &LoadOptions,
) -> Result<LoadedContent, SpecError> {
    let doc: RawDocument = match format {
        SpecFormat::Yaml => serde_yaml::from_str(content)?,
        SpecFormat::Json => serde_json::from_str(content)?,
    };
    Normalizer::new(options).normalize(&doc)
}
