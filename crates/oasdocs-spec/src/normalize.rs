//! Normalization of raw OpenAPI documents into sections and items.
//!
//! Grouping rules:
//! - operations are grouped into sections by their first tag;
//! - declared tags come first in declaration order, undeclared tags follow
//!   in first-use order;
//! - untagged operations land in a default section;
//! - sections without any operation are dropped.
//!
//! Each item gets a stable permalink (slug under the route base path, with
//! `-2`, `-3`… suffixes on collision) and a stable hash identifier derived
//! from the method and path template.

use std::collections::HashMap;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::document::{RawDocument, RawOperation};
use crate::error::SpecError;
use crate::types::{ApiItem, ApiSection, LabelField, LoadedContent};

/// Section title for operations without tags.
const DEFAULT_SECTION_TITLE: &str = "API";

/// Hex length of the item hash identifier.
const ITEM_ID_LEN: usize = 12;

/// Options controlling normalization output.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Route base path that permalinks are generated under.
    pub route_base_path: String,
    /// Field used for sidebar labels.
    pub label_field: LabelField,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            route_base_path: "api".to_owned(),
            label_field: LabelField::Summary,
        }
    }
}

/// Normalizes a raw document into [`LoadedContent`].
pub(crate) struct Normalizer<'a> {
    options: &'a LoadOptions,
    slug_chars: Regex,
    /// Slug → number of times already used, for collision suffixes.
    used_slugs: HashMap<String, usize>,
}

impl<'a> Normalizer<'a> {
    pub fn new(options: &'a LoadOptions) -> Self {
        Self {
            options,
            // Runs of anything outside [a-z0-9] collapse to a single dash
            slug_chars: Regex::new(r"[^a-z0-9]+").expect("valid slug regex"),
            used_slugs: HashMap::new(),
        }
    }

    /// Normalize the document into ordered sections of items.
    pub fn normalize(mut self, doc: &RawDocument) -> Result<LoadedContent, SpecError> {
        let mut sections: Vec<ApiSection> = Vec::new();
        let mut section_index: HashMap<String, usize> = HashMap::new();

        // Declared tags reserve their position even before first use
        for tag in &doc.tags {
            if section_index.contains_key(&tag.name) {
                tracing::warn!(tag = %tag.name, "Duplicate tag declaration ignored");
                continue;
            }
            section_index.insert(tag.name.clone(), sections.len());
            sections.push(ApiSection {
                title: tag.name.clone(),
                description: tag.description.clone(),
                items: Vec::new(),
            });
        }

        for (path, method, operation) in doc.operations()? {
            let title = operation
                .tags
                .first()
                .map_or(DEFAULT_SECTION_TITLE, String::as_str);
            let idx = *section_index
                .entry(title.to_owned())
                .or_insert_with(|| {
                    sections.push(ApiSection {
                        title: title.to_owned(),
                        description: None,
                        items: Vec::new(),
                    });
                    sections.len() - 1
                });
            let item = self.build_item(&path, &method, &operation);
            sections[idx].items.push(item);
        }

        // Declared tags without operations produce no section
        sections.retain(|s| !s.items.is_empty());

        Ok(LoadedContent {
            title: doc.info.title.clone(),
            description: doc.info.description.clone(),
            sections,
        })
    }

    fn build_item(&mut self, path: &str, method: &str, operation: &RawOperation) -> ApiItem {
        let method_upper = method.to_uppercase();
        let fallback = format!("{method_upper} {path}");

        let label = match self.options.label_field {
            LabelField::Summary => operation
                .summary
                .clone()
                .or_else(|| operation.operation_id.clone()),
            LabelField::OperationId => operation
                .operation_id
                .clone()
                .or_else(|| operation.summary.clone()),
        }
        .unwrap_or_else(|| fallback.clone());

        let slug_source = operation
            .operation_id
            .as_deref()
            .map_or_else(|| fallback.clone(), ToOwned::to_owned);
        let slug = self.unique_slug(&slug_source);

        ApiItem {
            permalink: join_url(&self.options.route_base_path, &slug),
            id: item_id(&method_upper, path),
            label,
            summary: operation.summary.clone(),
            operation_id: operation.operation_id.clone(),
            method: method_upper,
            path: path.to_owned(),
            deprecated: operation.deprecated,
            description: operation.description.clone().unwrap_or_default(),
        }
    }

    /// Slugify `source` and suffix it with `-2`, `-3`… on collision.
    fn unique_slug(&mut self, source: &str) -> String {
        let base = self.slugify(source);
        let count = self.used_slugs.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        }
    }

    fn slugify(&self, source: &str) -> String {
        let lower = source.to_lowercase();
        let slug = self.slug_chars.replace_all(&lower, "-");
        let slug = slug.trim_matches('-');
        if slug.is_empty() {
            "operation".to_owned()
        } else {
            slug.to_owned()
        }
    }
}

/// Stable hash identifier for an operation.
///
/// Derived from the uppercase method and path template, so it survives
/// edits to summaries and descriptions.
fn item_id(method: &str, path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_bytes());
    hasher.update(b" ");
    hasher.update(path.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..ITEM_ID_LEN].to_owned()
}

/// Join a base path and slug into a permalink with a single leading slash.
fn join_url(base: &str, slug: &str) -> String {
    let base = base.trim_matches('/');
    if base.is_empty() {
        format!("/{slug}")
    } else {
        format!("/{base}/{slug}")
    }
}
