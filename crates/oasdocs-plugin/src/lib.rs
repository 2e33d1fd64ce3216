//! Site integration adapter for OpenAPI documentation pages.
//!
//! This crate turns a loaded OpenAPI document (see `oasdocs-spec`) into
//! the artifacts a static-site builder consumes:
//! - a sidebar tree grouping operations by section
//! - per-operation data artifacts (item record JSON + raw description)
//!   and routes referencing them
//! - one aggregate route at the configured base path
//! - bundler configuration (module alias + text-transform rule) for the
//!   generated files
//!
//! The lifecycle is an explicit trait ([`SitePlugin`]) driven in a fixed
//! order by [`run_build`]; host primitives are behind [`HostActions`].
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use oasdocs_plugin::{
//!     ApiDocsPlugin, DataDir, PLUGIN_NAME, PluginOptions, PluginOptionsOverrides, run_build,
//! };
//!
//! let options = PluginOptions::merged(PluginOptionsOverrides {
//!     spec_path: Some(PathBuf::from("openapi.yaml")),
//!     ..PluginOptionsOverrides::default()
//! })?;
//! let plugin = ApiDocsPlugin::new(options)?;
//! let mut actions = DataDir::new(PathBuf::from("generated").join(PLUGIN_NAME))?;
//! let summary = run_build(&plugin, &mut actions)?;
//! println!("{} routes", summary.routes.len());
//! # Ok(())
//! # }
//! ```

mod actions;
mod bundler;
mod driver;
mod error;
mod options;
mod plugin;
mod routes;

pub use actions::{DataDir, HostActions, MemoryActions, hashed_file_name};
pub use bundler::{API_ALIAS, BundlerConfig, DESCRIPTION_SUFFIX, TransformRule};
pub use driver::{BuildSummary, run_build};
pub use error::PluginError;
pub use options::{
    AdmonitionsConfig, DEFAULT_API_ITEM_COMPONENT, DEFAULT_API_LAYOUT_COMPONENT,
    DEFAULT_ROUTE_BASE_PATH, PluginOptions, PluginOptionsOverrides,
};
pub use plugin::{ApiDocsPlugin, CALLOUT_STYLESHEET, PLUGIN_NAME, SitePlugin};
pub use routes::{
    ApiPageMetadata, RouteDescriptor, SIDEBAR_ID, Sidebar, SidebarCategory, SidebarLink,
    build_permalink_to_sidebar, build_sidebar,
};
