//! Plugin configuration.
//!
//! [`PluginOptions`] carries every knob with an explicit default value.
//! Overrides (from a config file or CLI flags) are merged left-to-right
//! over the defaults via [`PluginOptionsOverrides`]; the merged result is
//! immutable for the rest of the build.

use std::collections::BTreeMap;
use std::path::PathBuf;

use oasdocs_spec::{LabelField, LoadOptions};
use serde::Deserialize;

use crate::error::PluginError;

/// Default route base path for the generated API pages.
pub const DEFAULT_ROUTE_BASE_PATH: &str = "api";

/// Default aggregate page component identifier.
pub const DEFAULT_API_LAYOUT_COMPONENT: &str = "@theme/ApiPage";

/// Default per-operation page component identifier.
pub const DEFAULT_API_ITEM_COMPONENT: &str = "@theme/ApiItem";

/// Callout-box configuration.
///
/// Free-form settings passed through to the callout transform. Presence
/// (even empty) enables the callout stylesheet client module; `None`
/// disables it.
pub type AdmonitionsConfig = BTreeMap<String, serde_json::Value>;

/// Plugin configuration, immutable after merge.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginOptions {
    /// Route base path the API pages are mounted under.
    pub route_base_path: String,
    /// Path to the OpenAPI specification file. Unset means "no content".
    pub spec_path: Option<PathBuf>,
    /// Component identifier for the aggregate API page.
    pub api_layout_component: String,
    /// Component identifier for per-operation pages.
    pub api_item_component: String,
    /// Text-transform plugins applied before the default set.
    pub before_transform_plugins: Vec<String>,
    /// Text-transform plugins applied after the default set.
    pub transform_plugins: Vec<String>,
    /// Callout-box configuration. `Some` (default) enables callout styling.
    pub admonitions: Option<AdmonitionsConfig>,
    /// Item field used for sidebar labels.
    pub sidebar_label_field: LabelField,
    /// Identifier of the content block shown by default on item pages.
    pub default_content_id: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            route_base_path: DEFAULT_ROUTE_BASE_PATH.to_owned(),
            spec_path: None,
            api_layout_component: DEFAULT_API_LAYOUT_COMPONENT.to_owned(),
            api_item_component: DEFAULT_API_ITEM_COMPONENT.to_owned(),
            before_transform_plugins: Vec::new(),
            transform_plugins: Vec::new(),
            admonitions: Some(AdmonitionsConfig::new()),
            sidebar_label_field: LabelField::Summary,
            default_content_id: "summary".to_owned(),
        }
    }
}

/// Optional overrides merged over [`PluginOptions`] defaults.
///
/// All fields are optional. Only `Some` values override.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginOptionsOverrides {
    /// Override route base path.
    pub route_base_path: Option<String>,
    /// Override spec file path.
    pub spec_path: Option<PathBuf>,
    /// Override aggregate page component.
    pub api_layout_component: Option<String>,
    /// Override per-operation page component.
    pub api_item_component: Option<String>,
    /// Override before-transform plugin list.
    pub before_transform_plugins: Option<Vec<String>>,
    /// Override after-transform plugin list.
    pub transform_plugins: Option<Vec<String>>,
    /// Override callout configuration (`Some(None)` is not expressible
    /// from config files; use `disable_admonitions` to turn styling off).
    pub admonitions: Option<AdmonitionsConfig>,
    /// Disable callout styling entirely.
    pub disable_admonitions: Option<bool>,
    /// Override sidebar label field.
    pub sidebar_label_field: Option<LabelField>,
    /// Override the default content identifier.
    pub default_content_id: Option<String>,
}

impl PluginOptions {
    /// Merge overrides over these options, explicit values winning.
    pub fn apply(&mut self, overrides: PluginOptionsOverrides) {
        if let Some(base_path) = overrides.route_base_path {
            self.route_base_path = base_path;
        }
        if let Some(spec_path) = overrides.spec_path {
            self.spec_path = Some(spec_path);
        }
        if let Some(component) = overrides.api_layout_component {
            self.api_layout_component = component;
        }
        if let Some(component) = overrides.api_item_component {
            self.api_item_component = component;
        }
        if let Some(plugins) = overrides.before_transform_plugins {
            self.before_transform_plugins = plugins;
        }
        if let Some(plugins) = overrides.transform_plugins {
            self.transform_plugins = plugins;
        }
        if let Some(admonitions) = overrides.admonitions {
            self.admonitions = Some(admonitions);
        }
        if overrides.disable_admonitions == Some(true) {
            self.admonitions = None;
        }
        if let Some(field) = overrides.sidebar_label_field {
            self.sidebar_label_field = field;
        }
        if let Some(id) = overrides.default_content_id {
            self.default_content_id = id;
        }
    }

    /// Build merged options from defaults plus overrides.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Options`] if the merged result is invalid.
    pub fn merged(overrides: PluginOptionsOverrides) -> Result<Self, PluginError> {
        let mut options = Self::default();
        options.apply(overrides);
        options.validate()?;
        Ok(options)
    }

    /// Validate merged options.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Options`] if the route base path is empty
    /// after normalization or a component identifier is empty.
    pub fn validate(&self) -> Result<(), PluginError> {
        if self.route_base_path.trim_matches('/').is_empty() {
            return Err(PluginError::Options(
                "route_base_path cannot be empty".to_owned(),
            ));
        }
        if self.api_layout_component.is_empty() || self.api_item_component.is_empty() {
            return Err(PluginError::Options(
                "component identifiers cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Base path normalized to a route path with a single leading slash.
    #[must_use]
    pub fn base_route_path(&self) -> String {
        format!("/{}", self.route_base_path.trim_matches('/'))
    }

    /// Loader options derived from these plugin options.
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            route_base_path: self.route_base_path.clone(),
            label_field: self.sidebar_label_field,
        }
    }
}
