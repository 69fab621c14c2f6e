//! Filesystem-backed cache store.
//!
//! One file per artifact inside the cache directory. Writes go to a
//! temp name first and rename into place, so concurrent readers never
//! observe a partial artifact and racing writers of the same key end
//! up with identical bytes.

use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::CacheStore;
use crate::core::PipelineError;

/// Persistent store rooted at the configured cache directory.
#[derive(Debug)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Open the store, creating the directory when absent.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| PipelineError::CacheStore {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Delete every regular file whose basename is not in `keep`.
    ///
    /// Used by the manifest builder to purge artifacts from earlier
    /// fingerprints; the keep set is the blacklist of just-generated
    /// names, which prevents the sweep from deleting its own output.
    /// Returns the number of files removed.
    pub fn sweep_except(&self, keep: &FxHashSet<String>) -> Result<usize, PipelineError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| PipelineError::CacheStore {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if keep.contains(name) {
                continue;
            }
            if fs::remove_file(&path).is_ok() {
                crate::debug!("sweep"; "removed stale `{name}`");
                removed += 1;
            }
        }
        Ok(removed)
    }
}

impl CacheStore for FsStore {
    fn has(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, PipelineError> {
        let path = self.path_for(key);
        fs::read(&path).map_err(|e| PipelineError::CacheStore { path, source: e })
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), PipelineError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.{}", std::process::id()));

        fs::write(&tmp, bytes).map_err(|e| PipelineError::CacheStore {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &path).map_err(|e| PipelineError::CacheStore { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("nested/cache");
        let store = FsStore::open(&cache).unwrap();

        assert!(cache.is_dir());
        assert_eq!(store.dir(), cache);
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::open(dir.path()).unwrap();

        assert!(!store.has("app-abc123.js"));
        store.set("app-abc123.js", b"console.log(1)").unwrap();
        assert!(store.has("app-abc123.js"));
        assert_eq!(store.get("app-abc123.js").unwrap(), b"console.log(1)");

        // No temp files left behind.
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().starts_with('.'))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_redundant_set_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::open(dir.path()).unwrap();

        store.set("k.css", b"body{}").unwrap();
        store.set("k.css", b"body{}").unwrap();
        assert_eq!(store.get("k.css").unwrap(), b"body{}");
    }

    #[test]
    fn test_sweep_except() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::open(dir.path()).unwrap();

        store.set("fresh.css", b"a").unwrap();
        store.set("stale.css", b"b").unwrap();
        fs::write(dir.path().join("asset.cache"), "{}").unwrap();

        let mut keep = FxHashSet::default();
        keep.insert("fresh.css".to_string());
        keep.insert("asset.cache".to_string());

        let removed = store.sweep_except(&keep).unwrap();
        assert_eq!(removed, 1);
        assert!(store.has("fresh.css"));
        assert!(!store.has("stale.css"));
        assert!(dir.path().join("asset.cache").exists());
    }
}
