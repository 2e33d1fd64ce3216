//! Plugin lifecycle.
//!
//! [`SitePlugin`] is the fixed-vocabulary interface a site builder drives
//! once per build, in order: `load_content`, `content_loaded`,
//! `routes_loaded`, plus the static accessors (`theme_path`,
//! `paths_to_watch`, `client_modules`, `configure_bundler`).
//! [`ApiDocsPlugin`] implements it for OpenAPI content.
//!
//! Guards, not errors: an unset spec path, a missing spec file, and a
//! parsed document with zero sections all short-circuit to a successful
//! no-op. Everything else is build-fatal and propagates.

use std::path::{Path, PathBuf};

use oasdocs_spec::{ApiItem, LoadedContent, load_spec};
use rayon::prelude::*;

use crate::actions::{HostActions, hashed_file_name};
use crate::bundler::{API_ALIAS, BundlerConfig, DESCRIPTION_SUFFIX, TransformRule};
use crate::error::PluginError;
use crate::options::PluginOptions;
use crate::routes::{ApiPageMetadata, RouteDescriptor, build_permalink_to_sidebar, build_sidebar};

/// Plugin identifier, used to namespace the generated-files directory.
pub const PLUGIN_NAME: &str = "oasdocs-plugin-content-api";

/// Stylesheet client module enabled by callout configuration.
pub const CALLOUT_STYLESHEET: &str = "oasdocs/styles/callouts.css";

/// Module key of the per-item JSON artifact.
const MODULE_CONTENT: &str = "content";

/// Module key of the per-item description artifact.
const MODULE_DESCRIPTION: &str = "description";

/// Module key of the aggregate metadata artifact.
const MODULE_METADATA: &str = "metadata";

/// Lifecycle interface implemented by site plugins.
///
/// An orchestrator invokes the methods in a fixed order per build; see
/// [`run_build`](crate::run_build). There are no retries and no partial
/// success: any error fails the whole build.
pub trait SitePlugin {
    /// Unique plugin name.
    fn name(&self) -> &'static str;

    /// Directory of overridable UI templates.
    fn theme_path(&self) -> PathBuf;

    /// Files whose changes should trigger a rebuild.
    fn paths_to_watch(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Client-side modules (stylesheets) to bundle.
    fn client_modules(&self) -> Vec<String> {
        Vec::new()
    }

    /// Load raw content.
    ///
    /// `Ok(None)` is the explicit "no content" result; it is not a
    /// failure, and the rest of the lifecycle becomes a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if content exists but cannot be loaded.
    fn load_content(&self) -> Result<Option<LoadedContent>, PluginError>;

    /// Emit data artifacts and routes for loaded content.
    ///
    /// # Errors
    ///
    /// Returns an error if artifact serialization or persistence fails.
    fn content_loaded(
        &self,
        content: &LoadedContent,
        actions: &mut dyn HostActions,
    ) -> Result<(), PluginError>;

    /// Post-process the full route list once all plugins have contributed.
    ///
    /// # Errors
    ///
    /// Returns an error if post-processing fails.
    fn routes_loaded(&self, routes: &mut Vec<RouteDescriptor>) -> Result<(), PluginError>;

    /// Contribute build-tool configuration for the generated files.
    fn configure_bundler(&self, generated_dir: &Path) -> BundlerConfig;
}

/// OpenAPI documentation plugin.
pub struct ApiDocsPlugin {
    options: PluginOptions,
}

impl ApiDocsPlugin {
    /// Create a plugin from merged options.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Options`] if the options are invalid.
    pub fn new(options: PluginOptions) -> Result<Self, PluginError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The merged plugin options.
    #[must_use]
    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Write one item's two artifacts and build its route.
    fn emit_item_route(
        &self,
        actions: &dyn HostActions,
        item: &ApiItem,
    ) -> Result<RouteDescriptor, PluginError> {
        let record = serde_json::to_string_pretty(item)?;
        let content_path =
            actions.create_data(&hashed_file_name(&item.permalink, "json"), &record)?;

        let description_source = format!("{}-description", item.permalink);
        let description_path = actions.create_data(
            &hashed_file_name(&description_source, "mdx"),
            &item.description,
        )?;

        let mut modules = std::collections::BTreeMap::new();
        modules.insert(MODULE_CONTENT.to_owned(), content_path);
        modules.insert(MODULE_DESCRIPTION.to_owned(), description_path);

        Ok(RouteDescriptor {
            path: item.permalink.clone(),
            component: self.options.api_item_component.clone(),
            exact: true,
            modules,
            routes: Vec::new(),
        })
    }
}

impl SitePlugin for ApiDocsPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn theme_path(&self) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("theme")
    }

    fn paths_to_watch(&self) -> Vec<PathBuf> {
        self.options.spec_path.iter().cloned().collect()
    }

    fn client_modules(&self) -> Vec<String> {
        if self.options.admonitions.is_some() {
            vec![CALLOUT_STYLESHEET.to_owned()]
        } else {
            Vec::new()
        }
    }

    fn load_content(&self) -> Result<Option<LoadedContent>, PluginError> {
        let Some(spec_path) = &self.options.spec_path else {
            tracing::debug!("No spec path configured; nothing to generate");
            return Ok(None);
        };
        if !spec_path.exists() {
            tracing::warn!(path = %spec_path.display(), "Spec file not found; nothing to generate");
            return Ok(None);
        }
        let content = load_spec(spec_path, &self.options.load_options())?;
        Ok(Some(content))
    }

    fn content_loaded(
        &self,
        content: &LoadedContent,
        actions: &mut dyn HostActions,
    ) -> Result<(), PluginError> {
        if content.is_empty() {
            tracing::debug!("Loaded content has no sections; skipping registration");
            return Ok(());
        }

        let sidebar = build_sidebar(content);
        let permalink_to_sidebar = build_permalink_to_sidebar(content);

        // Item artifacts are independent writes; all must land before the
        // aggregate metadata (which embeds the permalink list) is written.
        let items: Vec<&ApiItem> = content
            .sections
            .iter()
            .flat_map(|section| &section.items)
            .collect();
        let shared: &dyn HostActions = actions;
        let item_routes: Vec<RouteDescriptor> = items
            .par_iter()
            .map(|&item| self.emit_item_route(shared, item))
            .collect::<Result<_, _>>()?;

        let metadata = ApiPageMetadata {
            sidebar,
            permalink_to_sidebar,
            default_content_id: self.options.default_content_id.clone(),
        };
        let base = self.options.base_route_path();
        let metadata_path = actions.create_data(
            &hashed_file_name(&base, "json"),
            &serde_json::to_string_pretty(&metadata)?,
        )?;

        let mut modules = std::collections::BTreeMap::new();
        modules.insert(MODULE_METADATA.to_owned(), metadata_path);
        actions.add_route(RouteDescriptor {
            path: base,
            component: self.options.api_layout_component.clone(),
            exact: false,
            modules,
            routes: item_routes,
        });

        tracing::debug!(
            sections = content.sections.len(),
            items = content.item_count(),
            "Registered API routes"
        );
        Ok(())
    }

    fn routes_loaded(&self, routes: &mut Vec<RouteDescriptor>) -> Result<(), PluginError> {
        let home = self.options.base_route_path();
        let mut claimants = routes.iter().filter(|r| r.path == home).count();
        if claimants <= 1 {
            return Ok(());
        }

        // Another page occupies our base path. Drop our own layout routes
        // until a single claimant remains; foreign routes are untouched.
        routes.retain(|route| {
            if claimants > 1
                && route.path == home
                && route.component == self.options.api_layout_component
            {
                tracing::warn!(path = %home, "Removing duplicate API route at home path");
                claimants -= 1;
                false
            } else {
                true
            }
        });
        Ok(())
    }

    fn configure_bundler(&self, generated_dir: &Path) -> BundlerConfig {
        let mut aliases = std::collections::BTreeMap::new();
        aliases.insert(API_ALIAS.to_owned(), generated_dir.to_path_buf());

        BundlerConfig {
            aliases,
            rules: vec![TransformRule {
                test: DESCRIPTION_SUFFIX.to_owned(),
                include: generated_dir.to_path_buf(),
                before_plugins: self.options.before_transform_plugins.clone(),
                plugins: self.options.transform_plugins.clone(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    // The plugin is shared across rayon workers during artifact emission
    static_assertions::assert_impl_all!(super::ApiDocsPlugin: Send, Sync);

    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use crate::actions::MemoryActions;
    use crate::options::PluginOptionsOverrides;

    use super::*;

    const PETSTORE_JSON: &str = r#"{
        "info": {"title": "Petstore"},
        "tags": [{"name": "pets"}, {"name": "store"}],
        "paths": {
            "/pets": {
                "get": {"tags": ["pets"], "operationId": "listPets", "summary": "List pets",
                        "description": "Returns all pets."},
                "post": {"tags": ["pets"], "operationId": "createPet", "summary": "Create a pet"}
            },
            "/orders": {
                "get": {"tags": ["store"], "operationId": "listOrders", "summary": "List orders",
                        "deprecated": true}
            }
        }
    }"#;

    fn plugin_with_spec(dir: &Path) -> ApiDocsPlugin {
        let spec_path = dir.join("openapi.json");
        std::fs::write(&spec_path, PETSTORE_JSON).unwrap();
        let options = PluginOptions::merged(PluginOptionsOverrides {
            spec_path: Some(spec_path),
            ..PluginOptionsOverrides::default()
        })
        .unwrap();
        ApiDocsPlugin::new(options).unwrap()
    }

    fn route(path: &str, component: &str) -> RouteDescriptor {
        RouteDescriptor {
            path: path.to_owned(),
            component: component.to_owned(),
            exact: false,
            modules: BTreeMap::new(),
            routes: Vec::new(),
        }
    }

    #[test]
    fn test_load_content_without_spec_path() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();

        assert!(plugin.load_content().unwrap().is_none());
        assert!(plugin.paths_to_watch().is_empty());
    }

    #[test]
    fn test_load_content_missing_file() {
        let options = PluginOptions::merged(PluginOptionsOverrides {
            spec_path: Some(PathBuf::from("/nonexistent/openapi.yaml")),
            ..PluginOptionsOverrides::default()
        })
        .unwrap();
        let plugin = ApiDocsPlugin::new(options).unwrap();

        assert!(plugin.load_content().unwrap().is_none());
    }

    #[test]
    fn test_load_content_parses_spec() {
        let tmp = tempfile::tempdir().unwrap();
        let plugin = plugin_with_spec(tmp.path());

        let content = plugin.load_content().unwrap().unwrap();

        assert_eq!(content.title, "Petstore");
        assert_eq!(content.sections.len(), 2);
        assert_eq!(content.item_count(), 3);
        assert_eq!(plugin.paths_to_watch(), vec![tmp.path().join("openapi.json")]);
    }

    #[test]
    fn test_content_loaded_empty_is_noop() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();
        let mut actions = MemoryActions::new();
        let empty = LoadedContent {
            title: String::new(),
            description: None,
            sections: Vec::new(),
        };

        plugin.content_loaded(&empty, &mut actions).unwrap();

        assert_eq!(actions.artifact_count(), 0);
        assert!(actions.routes().is_empty());
    }

    #[test]
    fn test_content_loaded_registers_routes_and_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let plugin = plugin_with_spec(tmp.path());
        let content = plugin.load_content().unwrap().unwrap();
        let mut actions = MemoryActions::new();

        plugin.content_loaded(&content, &mut actions).unwrap();

        // Two artifacts per item plus one aggregate metadata artifact
        assert_eq!(actions.artifact_count(), 3 * 2 + 1);

        // One aggregate route with one child per item
        assert_eq!(actions.routes().len(), 1);
        let aggregate = &actions.routes()[0];
        assert_eq!(aggregate.path, "/api");
        assert_eq!(aggregate.component, "@theme/ApiPage");
        assert!(!aggregate.exact);
        assert_eq!(aggregate.routes.len(), 3);
        assert!(aggregate.routes.iter().all(|r| r.exact));
        assert!(
            aggregate
                .routes
                .iter()
                .all(|r| r.component == "@theme/ApiItem")
        );
    }

    #[test]
    fn test_item_artifacts_are_consistent() {
        let tmp = tempfile::tempdir().unwrap();
        let plugin = plugin_with_spec(tmp.path());
        let content = plugin.load_content().unwrap().unwrap();
        let mut actions = MemoryActions::new();

        plugin.content_loaded(&content, &mut actions).unwrap();

        let first = &content.sections[0].items[0];
        let record_name = hashed_file_name(&first.permalink, "json");
        let record: ApiItem =
            serde_json::from_str(&actions.artifact(&record_name).unwrap()).unwrap();
        assert_eq!(&record, first);

        let description_name =
            hashed_file_name(&format!("{}-description", first.permalink), "mdx");
        assert_eq!(
            actions.artifact(&description_name).unwrap(),
            "Returns all pets."
        );
    }

    #[test]
    fn test_aggregate_metadata_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let plugin = plugin_with_spec(tmp.path());
        let content = plugin.load_content().unwrap().unwrap();
        let mut actions = MemoryActions::new();

        plugin.content_loaded(&content, &mut actions).unwrap();

        let metadata_name = hashed_file_name("/api", "json");
        let metadata: ApiPageMetadata =
            serde_json::from_str(&actions.artifact(&metadata_name).unwrap()).unwrap();

        assert_eq!(metadata.sidebar.len(), 2);
        assert_eq!(metadata.sidebar[0].items.len(), 2);
        assert_eq!(metadata.sidebar[1].items.len(), 1);
        assert!(metadata.sidebar[1].items[0].deprecated);
        assert_eq!(metadata.permalink_to_sidebar.len(), 3);
        assert!(metadata.permalink_to_sidebar.values().all(|v| v == "api"));
        assert_eq!(metadata.default_content_id, "summary");
    }

    #[test]
    fn test_routes_loaded_single_claimant_untouched() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();
        let mut routes = vec![route("/api", "@theme/ApiPage"), route("/docs", "@theme/Docs")];

        plugin.routes_loaded(&mut routes).unwrap();

        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn test_routes_loaded_removes_own_duplicate() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();
        let mut routes = vec![
            route("/api", "@theme/HomePage"),
            route("/api", "@theme/ApiPage"),
        ];

        plugin.routes_loaded(&mut routes).unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].component, "@theme/HomePage");
    }

    #[test]
    fn test_routes_loaded_keeps_one_when_both_are_ours() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();
        let mut routes = vec![
            route("/api", "@theme/ApiPage"),
            route("/api", "@theme/ApiPage"),
        ];

        plugin.routes_loaded(&mut routes).unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].component, "@theme/ApiPage");
    }

    #[test]
    fn test_routes_loaded_ignores_other_duplicates() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();
        let mut routes = vec![
            route("/docs", "@theme/Docs"),
            route("/docs", "@theme/Docs"),
            route("/api", "@theme/ApiPage"),
        ];

        plugin.routes_loaded(&mut routes).unwrap();

        assert_eq!(routes.len(), 3);
    }

    #[test]
    fn test_client_modules_follow_admonitions() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();
        assert_eq!(plugin.client_modules(), vec![CALLOUT_STYLESHEET.to_owned()]);

        let options = PluginOptions::merged(PluginOptionsOverrides {
            disable_admonitions: Some(true),
            ..PluginOptionsOverrides::default()
        })
        .unwrap();
        let plugin = ApiDocsPlugin::new(options).unwrap();
        assert!(plugin.client_modules().is_empty());
    }

    #[test]
    fn test_configure_bundler() {
        let options = PluginOptions::merged(PluginOptionsOverrides {
            before_transform_plugins: Some(vec!["admonitions".to_owned()]),
            transform_plugins: Some(vec!["emoji".to_owned()]),
            ..PluginOptionsOverrides::default()
        })
        .unwrap();
        let plugin = ApiDocsPlugin::new(options).unwrap();

        let config = plugin.configure_bundler(Path::new("/gen/api"));

        assert_eq!(
            config.aliases.get(API_ALIAS),
            Some(&PathBuf::from("/gen/api"))
        );
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].test, DESCRIPTION_SUFFIX);
        assert_eq!(config.rules[0].include, PathBuf::from("/gen/api"));
        assert_eq!(config.rules[0].before_plugins, vec!["admonitions".to_owned()]);
        assert_eq!(config.rules[0].plugins, vec!["emoji".to_owned()]);
    }

    #[test]
    fn test_theme_path_is_fixed() {
        let plugin = ApiDocsPlugin::new(PluginOptions::default()).unwrap();
        let theme = plugin.theme_path();

        assert!(theme.ends_with("theme"));
        assert_eq!(plugin.name(), PLUGIN_NAME);
    }
}
