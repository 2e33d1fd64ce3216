//! Build orchestration.
//!
//! Drives a [`SitePlugin`] through its lifecycle in the fixed per-build
//! order: `load_content`, `content_loaded`, `routes_loaded`. There is no
//! branching beyond the absent/empty-content guards and no retry; any
//! error fails the build.

use crate::actions::HostActions;
use crate::error::PluginError;
use crate::plugin::SitePlugin;
use crate::routes::{RouteDescriptor, Sidebar, build_sidebar};

/// Result of one build pass.
#[derive(Debug, Default)]
pub struct BuildSummary {
    /// Number of sections loaded.
    pub sections: usize,
    /// Number of operation items loaded.
    pub items: usize,
    /// Number of data artifacts written (two per item plus one aggregate).
    pub artifacts: usize,
    /// Sidebar tree built from the loaded content.
    pub sidebar: Sidebar,
    /// Final route list after post-processing.
    pub routes: Vec<RouteDescriptor>,
}

impl BuildSummary {
    /// True if the build produced no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }
}

/// Run one build pass of `plugin` against `actions`.
///
/// Absent content (`load_content` returning `None`) and empty content
/// (zero sections) produce an empty summary without touching the host.
///
/// # Errors
///
/// Propagates any [`PluginError`] from the lifecycle; the caller is
/// expected to fail the whole build.
pub fn run_build<P: SitePlugin>(
    plugin: &P,
    actions: &mut dyn HostActions,
) -> Result<BuildSummary, PluginError> {
    let Some(content) = plugin.load_content()? else {
        tracing::debug!(plugin = plugin.name(), "No content loaded");
        return Ok(BuildSummary::default());
    };
    if content.is_empty() {
        tracing::debug!(plugin = plugin.name(), "Content is empty");
        return Ok(BuildSummary::default());
    }

    plugin.content_loaded(&content, actions)?;
    plugin.routes_loaded(actions.routes_mut())?;

    let items = content.item_count();
    Ok(BuildSummary {
        sections: content.sections.len(),
        items,
        artifacts: items * 2 + 1,
        sidebar: build_sidebar(&content),
        routes: actions.routes_mut().clone(),
    })
}
