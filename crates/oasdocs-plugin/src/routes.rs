//! Route and sidebar descriptors.
//!
//! Derived, read-only views built once per build from the loaded sections:
//! a sidebar tree for navigation, one route descriptor per item, and a
//! permalink lookup keyed to the single sidebar.

use std::collections::BTreeMap;
use std::path::PathBuf;

use oasdocs_spec::LoadedContent;
use serde::{Deserialize, Serialize};

/// Identifier of the single sidebar produced per build.
pub const SIDEBAR_ID: &str = "api";

/// A route contributed to the site's route table.
///
/// Routes may nest: the aggregate API route carries one subordinate route
/// per operation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// URL path this route is mounted at.
    pub path: String,
    /// Component identifier rendering this route.
    pub component: String,
    /// Whether the path must match exactly.
    #[serde(default)]
    pub exact: bool,
    /// Named generated data artifacts this route depends on.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modules: BTreeMap<String, PathBuf>,
    /// Subordinate routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteDescriptor>,
}

/// A sidebar link to one operation page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarLink {
    /// Link target (item permalink).
    pub href: String,
    /// Display label.
    pub label: String,
    /// True if the operation is deprecated.
    #[serde(default)]
    pub deprecated: bool,
}

/// A sidebar category grouping one section's links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarCategory {
    /// Category label (section title).
    pub label: String,
    /// Categories start collapsed.
    pub collapsed: bool,
    /// Links in section order.
    pub items: Vec<SidebarLink>,
}

/// Sidebar tree: one category per section, in section order.
pub type Sidebar = Vec<SidebarCategory>;

/// Aggregate metadata artifact attached to the API layout route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPageMetadata {
    /// Sidebar tree for the whole API.
    pub sidebar: Sidebar,
    /// Permalink → sidebar identifier, one entry per item route.
    pub permalink_to_sidebar: BTreeMap<String, String>,
    /// Content block shown by default on item pages.
    pub default_content_id: String,
}

/// Build the sidebar tree from loaded content.
#[must_use]
pub fn build_sidebar(content: &LoadedContent) -> Sidebar {
    content
        .sections
        .iter()
        .map(|section| SidebarCategory {
            label: section.title.clone(),
            collapsed: true,
            items: section
                .items
                .iter()
                .map(|item| SidebarLink {
                    href: item.permalink.clone(),
                    label: item.label.clone(),
                    deprecated: item.deprecated,
                })
                .collect(),
        })
        .collect()
}

/// Build the permalink → sidebar lookup, one entry per item.
#[must_use]
pub fn build_permalink_to_sidebar(content: &LoadedContent) -> BTreeMap<String, String> {
    content
        .sections
        .iter()
        .flat_map(|section| &section.items)
        .map(|item| (item.permalink.clone(), SIDEBAR_ID.to_owned()))
        .collect()
}
