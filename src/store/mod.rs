//! Artifact stores: durable cache plus optional process cache.

mod fs;
pub mod process;

pub use fs::FsStore;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::PipelineError;

/// Durable keyed byte store for compiled artifacts.
///
/// Keys are content-addressed, so redundant writes from racing
/// builders are idempotent; implementations must tolerate concurrent
/// readers and writers but never need to lock.
pub trait CacheStore {
    /// Test whether an artifact exists under `key`.
    fn has(&self, key: &str) -> bool;

    /// Read the artifact stored under `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>, PipelineError>;

    /// Store an artifact under `key`.
    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), PipelineError>;
}

/// In-memory store for tests and ephemeral tooling.
///
/// Counts writes so callers can assert the at-most-one-compile
/// guarantee without filesystem races.
#[derive(Debug, Default)]
pub struct MemStore {
    entries: Mutex<FxHashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls observed.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl CacheStore for MemStore {
    fn has(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, PipelineError> {
        self.entries.lock().get(key).cloned().ok_or_else(|| {
            PipelineError::CacheStore {
                path: key.into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such entry"),
            }
        })
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), PipelineError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_store_roundtrip() {
        let store = MemStore::new();
        assert!(!store.has("a.css"));

        store.set("a.css", b"body{}").unwrap();
        assert!(store.has("a.css"));
        assert_eq!(store.get("a.css").unwrap(), b"body{}");
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_mem_store_get_missing() {
        let store = MemStore::new();
        assert!(store.get("nope").is_err());
    }
}
