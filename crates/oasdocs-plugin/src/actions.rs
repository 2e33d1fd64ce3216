//! Host action seam.
//!
//! [`HostActions`] is the explicit interface to the two primitives the
//! site builder provides during `content_loaded`: persisting named data
//! artifacts and registering routes. [`DataDir`] is the filesystem
//! implementation writing into an explicitly supplied generated-files
//! directory; [`MemoryActions`] keeps everything in memory for tests and
//! dry runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::error::PluginError;
use crate::routes::RouteDescriptor;

/// Maximum length of the readable prefix in generated file names.
const HASH_NAME_PREFIX_LEN: usize = 44;

/// Hex length of the content-hash suffix in generated file names.
const HASH_NAME_SUFFIX_LEN: usize = 6;

/// Host-provided build primitives.
///
/// `create_data` takes `&self` so that independent per-item artifacts can
/// be written concurrently; implementations must be thread-safe.
pub trait HostActions: Sync {
    /// Persist a named data artifact and return its path.
    ///
    /// Artifacts with the same name are overwritten; names are expected to
    /// be content-addressed via [`hashed_file_name`].
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Io`] if the artifact cannot be written.
    fn create_data(&self, file_name: &str, content: &str) -> Result<PathBuf, PluginError>;

    /// Register a route with the site builder.
    fn add_route(&mut self, route: RouteDescriptor);

    /// Access the full route list for post-processing.
    ///
    /// Available once all routes have been contributed; used by
    /// `routes_loaded` to resolve path collisions.
    fn routes_mut(&mut self) -> &mut Vec<RouteDescriptor>;
}

/// Derive a stable, readable file name for a data artifact.
///
/// The name is a kebab-cased prefix of `source` (for debuggability of the
/// generated directory) plus a short content hash of the full string, so
/// distinct permalinks never collide after truncation.
#[must_use]
pub fn hashed_file_name(source: &str, extension: &str) -> String {
    let mut prefix: String = source
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    prefix.truncate(HASH_NAME_PREFIX_LEN);
    let prefix = prefix.trim_matches('-');

    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let digest = hex::encode(hasher.finalize());
    let short = &digest[..HASH_NAME_SUFFIX_LEN];

    if prefix.is_empty() {
        format!("{short}.{extension}")
    } else {
        format!("{prefix}-{short}.{extension}")
    }
}

/// Filesystem-backed host actions.
///
/// Writes artifacts into a generated-files directory supplied at
/// construction (the caller namespaces it by plugin name) and collects
/// registered routes in memory.
#[derive(Debug)]
pub struct DataDir {
    dir: PathBuf,
    routes: Vec<RouteDescriptor>,
}

impl DataDir {
    /// Create the generated-files directory and a handle writing into it.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Io`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PluginError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| PluginError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            routes: Vec::new(),
        })
    }

    /// The generated-files directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Routes registered so far.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Consume the handle, returning the registered routes.
    #[must_use]
    pub fn into_routes(self) -> Vec<RouteDescriptor> {
        self.routes
    }
}

impl HostActions for DataDir {
    fn create_data(&self, file_name: &str, content: &str) -> Result<PathBuf, PluginError> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, content).map_err(|source| PluginError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn add_route(&mut self, route: RouteDescriptor) {
        self.routes.push(route);
    }

    fn routes_mut(&mut self) -> &mut Vec<RouteDescriptor> {
        &mut self.routes
    }
}

/// In-memory host actions for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryActions {
    files: Mutex<BTreeMap<String, String>>,
    routes: Vec<RouteDescriptor>,
}

impl MemoryActions {
    /// Create an empty in-memory recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of artifacts created.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    /// Content of a created artifact by file name.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn artifact(&self, file_name: &str) -> Option<String> {
        self.files.lock().unwrap().get(file_name).cloned()
    }

    /// Routes registered so far.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }
}

impl HostActions for MemoryActions {
    fn create_data(&self, file_name: &str, content: &str) -> Result<PathBuf, PluginError> {
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_owned(), content.to_owned());
        Ok(Path::new("~api").join(file_name))
    }

    fn add_route(&mut self, route: RouteDescriptor) {
        self.routes.push(route);
    }

    fn routes_mut(&mut self) -> &mut Vec<RouteDescriptor> {
        &mut self.routes
    }
}
