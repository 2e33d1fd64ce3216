//! Normalized API documentation records.
//!
//! These are the build-scoped records the loader produces from an OpenAPI
//! document: ordered sections of operation-level items with stable
//! permalinks and hash identifiers. Nothing here is mutated after
//! construction; every build recomputes the whole structure from scratch.

use serde::{Deserialize, Serialize};

/// Field used as the human-readable label for sidebar entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelField {
    /// Use the operation summary (default).
    #[default]
    Summary,
    /// Use the operation id.
    OperationId,
}

/// A single documented API operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiItem {
    /// Stable URL path for this operation's page (with leading slash).
    pub permalink: String,
    /// Stable hash identifier derived from method and path.
    pub id: String,
    /// Human-readable label for navigation entries.
    pub label: String,
    /// Operation summary, if present in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation id, if present in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Uppercase HTTP method (e.g., "GET").
    pub method: String,
    /// Path template as written in the document (e.g., "/pets/{id}").
    pub path: String,
    /// True if the operation is marked deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Free-text operation description (raw markdown).
    #[serde(default)]
    pub description: String,
}

/// A named category of API items, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Section title (tag name or the default section title).
    pub title: String,
    /// Tag description, if the tag was declared with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operations in this section, in document order.
    pub items: Vec<ApiItem>,
}

/// Result of loading and normalizing an OpenAPI document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedContent {
    /// API title from the document's info block.
    pub title: String,
    /// API description from the document's info block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered sections of items.
    pub sections: Vec<ApiSection>,
}

impl LoadedContent {
    /// Total number of items across all sections.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// True if the document produced no sections at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
