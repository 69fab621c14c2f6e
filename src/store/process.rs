//! Process-wide cache for loaded manifests.
//!
//! Thread-safe global storage keyed by cache directory, so repeated
//! production renders skip re-reading and re-deserializing the
//! manifest blob. Purely an optimization: a missing entry only costs
//! a reload.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use crate::manifest::RenderManifest;

/// Cache directory -> loaded manifest.
static MANIFESTS: LazyLock<DashMap<PathBuf, Arc<RenderManifest>>> = LazyLock::new(DashMap::new);

/// Fetch the manifest loaded for a cache directory, if any.
pub fn fetch(cache_dir: &Path) -> Option<Arc<RenderManifest>> {
    MANIFESTS.get(cache_dir).map(|m| m.clone())
}

/// Store a loaded manifest for a cache directory.
pub fn store(cache_dir: &Path, manifest: Arc<RenderManifest>) {
    MANIFESTS.insert(cache_dir.to_path_buf(), manifest);
}

/// Drop the cached manifest for a cache directory.
///
/// Called after a manifest rebuild so the next lookup reloads from
/// disk instead of serving the superseded mapping.
pub fn delete(cache_dir: &Path) {
    MANIFESTS.remove(cache_dir);
}

/// Clear all cached manifests.
pub fn clear() {
    MANIFESTS.clear();
}
