//! `oasdocs build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use oasdocs_plugin::{
    ApiDocsPlugin, DataDir, PLUGIN_NAME, PluginOptions, PluginOptionsOverrides, SitePlugin,
    run_build,
};
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Default config file name, discovered by walking up from the current
/// directory when `--config` is not given.
const CONFIG_FILE_NAME: &str = "oasdocs.toml";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover oasdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the OpenAPI specification file (overrides config).
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "generated")]
    out: PathBuf,

    /// Route base path for the API pages (overrides config).
    #[arg(long)]
    base_path: Option<String>,

    /// Enable verbose output (show per-section timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, the options are
    /// invalid, or the build itself fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let mut options = PluginOptions::default();
        if let Some(config_path) = self.config.or_else(discover_config) {
            output.info(&format!("Using config: {}", config_path.display()));
            options.apply(load_overrides(&config_path)?);
        }
        // CLI flags win over config file values
        options.apply(PluginOptionsOverrides {
            spec_path: self.spec,
            route_base_path: self.base_path,
            ..PluginOptionsOverrides::default()
        });
        options.validate()?;

        let plugin = ApiDocsPlugin::new(options)?;
        let mut actions = DataDir::new(self.out.join(PLUGIN_NAME))?;
        let summary = run_build(&plugin, &mut actions)?;

        if summary.is_empty() {
            output.warning("No API content generated (spec missing or empty)");
            return Ok(());
        }

        let bundler = plugin.configure_bundler(actions.dir());
        write_manifest(&self.out.join("routes.json"), &summary.routes)?;
        write_manifest(&self.out.join("sidebar.json"), &summary.sidebar)?;
        write_manifest(&self.out.join("bundler.json"), &bundler)?;

        output.success(&format!(
            "Generated {} operations in {} sections ({} artifacts) -> {}",
            summary.items,
            summary.sections,
            summary.artifacts,
            self.out.display()
        ));
        Ok(())
    }
}

/// Read and parse a TOML config file into option overrides.
fn load_overrides(path: &Path) -> Result<PluginOptionsOverrides, CliError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Walk up from the current directory looking for the default config file.
fn discover_config() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Write a pretty-printed JSON manifest next to the generated files.
fn write_manifest<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
