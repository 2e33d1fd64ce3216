//! Raw OpenAPI document model.
//!
//! Deserializes just the slice of an OpenAPI document that the
//! documentation plugin needs: the info block, tag declarations, and
//! per-path operations. Everything else (schemas, servers, security) is
//! ignored. Path order is preserved as written in the document.

use serde::Deserialize;
use serde_json::Value;

/// HTTP methods recognized as operation keys, in presentation order.
pub(crate) const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Top-level OpenAPI document, reduced to the fields the plugin consumes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDocument {
    /// API metadata.
    #[serde(default)]
    pub info: RawInfo,
    /// Declared tags, in declaration order.
    #[serde(default)]
    pub tags: Vec<RawTag>,
    /// Path items, in document order.
    #[serde(default)]
    pub paths: serde_json::Map<String, Value>,
}

/// The `info` block of an OpenAPI document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawInfo {
    pub title: String,
    pub description: Option<String>,
}

/// A declared tag.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTag {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single operation under a path item.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RawOperation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

impl RawDocument {
    /// Iterate operations in document order.
    ///
    /// Paths are visited as written in the document; within a path item,
    /// methods are visited in the fixed [`HTTP_METHODS`] order. Path items
    /// that are not objects and keys that are not operation methods
    /// (e.g., `parameters`, `summary`, `x-` extensions) are skipped.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if an operation value is present
    /// but malformed.
    pub fn operations(&self) -> Result<Vec<(String, String, RawOperation)>, serde_json::Error> {
        let mut operations = Vec::new();
        for (path, item) in &self.paths {
            let Some(item) = item.as_object() else {
                tracing::debug!(path, "Skipping non-object path item");
                continue;
            };
            for method in HTTP_METHODS {
                if let Some(value) = item.get(method) {
                    let operation: RawOperation = serde_json::from_value(value.clone())?;
                    operations.push((path.clone(), method.to_owned(), operation));
                }
            }
        }
        Ok(operations)
    }
}
