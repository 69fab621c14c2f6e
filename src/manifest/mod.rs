//! Production render manifest.
//!
//! The manifest is the whole of production mode: a precomputed mapping
//! from group to its fully expanded, deduplicated compiled-file list,
//! built offline and loaded read-only at runtime in place of
//! dependency resolution and the build cache.

pub mod builder;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::core::{AssetKind, PipelineError};
use crate::store::process;

/// File name of the serialized manifest inside the cache directory.
pub const MANIFEST_FILE: &str = "asset.cache";

/// Per-group manifest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Dependency-expanded, deduplicated output references, in render
    /// order.
    pub files: Vec<String>,
    /// Enabled flag as configured at manifest-build time.
    pub enabled: bool,
}

/// Precomputed mapping consumed by production renders.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RenderManifest {
    #[serde(default)]
    pub scripts: FxHashMap<String, ManifestEntry>,
    #[serde(default)]
    pub styles: FxHashMap<String, ManifestEntry>,
    /// Manifest creation time (Unix timestamp in seconds)
    #[serde(default)]
    pub built_at: u64,
}

impl RenderManifest {
    /// Create an empty manifest stamped with the current time.
    pub fn new() -> Self {
        Self {
            scripts: FxHashMap::default(),
            styles: FxHashMap::default(),
            built_at: current_timestamp(),
        }
    }

    fn entries(&self, kind: AssetKind) -> &FxHashMap<String, ManifestEntry> {
        match kind {
            AssetKind::Script => &self.scripts,
            AssetKind::Style => &self.styles,
        }
    }

    pub fn entry(&self, kind: AssetKind, name: &str) -> Option<&ManifestEntry> {
        self.entries(kind).get(name)
    }

    pub fn insert(&mut self, kind: AssetKind, name: &str, entry: ManifestEntry) {
        let entries = match kind {
            AssetKind::Script => &mut self.scripts,
            AssetKind::Style => &mut self.styles,
        };
        entries.insert(name.to_string(), entry);
    }

    pub fn len(&self) -> usize {
        self.scripts.len() + self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty()
    }

    /// Load the manifest blob from a cache directory.
    ///
    /// Any failure maps to [`PipelineError::ManifestMissing`]: without
    /// a readable manifest, production mode cannot serve at all.
    pub fn load(cache_dir: &Path) -> Result<Self, PipelineError> {
        let path = cache_dir.join(MANIFEST_FILE);
        let raw =
            fs::read_to_string(&path).map_err(|_| PipelineError::ManifestMissing(path.clone()))?;
        serde_json::from_str(&raw).map_err(|_| PipelineError::ManifestMissing(path))
    }

    /// Serialize the manifest into a cache directory.
    pub fn save(&self, cache_dir: &Path) -> Result<(), PipelineError> {
        let path = cache_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).map_err(|e| PipelineError::CacheStore {
            path: path.clone(),
            source: std::io::Error::other(e),
        })?;
        fs::write(&path, json).map_err(|e| PipelineError::CacheStore { path, source: e })
    }

    /// Load through the process cache, reading from disk once per
    /// cache directory until invalidated by a rebuild.
    pub fn load_cached(cache_dir: &Path) -> Result<Arc<Self>, PipelineError> {
        if let Some(manifest) = process::fetch(cache_dir) {
            return Ok(manifest);
        }
        let manifest = Arc::new(Self::load(cache_dir)?);
        process::store(cache_dir, manifest.clone());
        Ok(manifest)
    }
}

/// Get current Unix timestamp in seconds
fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
