//! OpenAPI document loading and normalization for oasdocs.
//!
//! This crate provides:
//! - [`load_spec`] / [`parse_spec`]: parse an OpenAPI document (YAML or
//!   JSON) and normalize it into ordered [`ApiSection`]s of [`ApiItem`]s
//! - stable permalinks and hash identifiers per operation
//!
//! Only the slice of OpenAPI that documentation navigation needs is
//! modeled (info, tags, per-path operations); schemas and the rest of the
//! document are ignored.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use oasdocs_spec::{LoadOptions, load_spec};
//!
//! let content = load_spec(Path::new("openapi.yaml"), &LoadOptions::default())?;
//! for section in &content.sections {
//!     println!("{}: {} operations", section.title, section.items.len());
//! }
//! # Ok(())
//! # }
//! ```

pub(crate) mod document;
mod error;
mod loader;
mod normalize;
mod types;

pub use error::SpecError;
pub use loader::{SpecFormat, load_spec, parse_spec};
pub use normalize::LoadOptions;
pub use types::{ApiItem, ApiSection, LabelField, LoadedContent};
