//! Bundler configuration descriptors.
//!
//! The plugin does not drive a bundler itself; it contributes plain data
//! the host merges into its build-tool configuration: a module-resolution
//! alias for the generated-files directory and a transform rule routing
//! generated description files through the text-transform pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Alias under which generated data files are importable.
pub const API_ALIAS: &str = "~api";

/// File suffix matched by the description transform rule.
pub const DESCRIPTION_SUFFIX: &str = ".mdx";

/// A text-transform rule for generated files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRule {
    /// File suffix this rule applies to.
    pub test: String,
    /// Directory whose files the rule covers.
    pub include: PathBuf,
    /// Transform plugins applied before the default set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_plugins: Vec<String>,
    /// Transform plugins applied after the default set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
}

/// Contribution to the host's build-tool configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// Module-resolution aliases (alias → directory).
    pub aliases: BTreeMap<String, PathBuf>,
    /// Transform rules for generated files.
    pub rules: Vec<TransformRule>,
}
