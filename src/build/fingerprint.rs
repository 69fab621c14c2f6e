//! Build-cache fingerprints.
//!
//! A fingerprint digests everything that determines a group's compiled
//! bytes: each local source's relative path and modification time, the
//! ordered transform identifiers applied, and, for style groups with
//! LESS sources, a salt over every `.less` file under the less
//! directory. The dialect allows cross-file includes that are never
//! declared, so touching any file there must invalidate every
//! LESS-derived cache entry; hashing the whole directory trades some
//! unnecessary rebuilds for not having to parse the import graph.

use jwalk::WalkDir;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::core::PipelineError;

/// Incremental fingerprint hasher with a length-prefixed encoding.
///
/// Every record is framed by its byte length before hashing, so
/// adjacent components can never collide through concatenation
/// ambiguity (`"ab" + "c"` hashes differently from `"a" + "bc"`).
#[derive(Default)]
pub struct FingerprintHasher {
    inner: blake3::Hasher,
}

impl FingerprintHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_bytes(&mut self, bytes: &[u8]) {
        self.inner.update(&(bytes.len() as u64).to_le_bytes());
        self.inner.update(bytes);
    }

    pub fn record_str(&mut self, s: &str) {
        self.record_bytes(s.as_bytes());
    }

    pub fn record_u64(&mut self, v: u64) {
        self.record_bytes(&v.to_le_bytes());
    }

    /// Finalize to the hex digest used in cache keys.
    pub fn digest(self) -> String {
        self.inner.finalize().to_hex()[..16].to_string()
    }
}

/// Record a source file's identity and modification time.
///
/// The path is recorded relative to `root` so fingerprints survive a
/// checkout moving between machines.
pub fn record_source(
    hasher: &mut FingerprintHasher,
    root: &Path,
    path: &Path,
) -> Result<(), PipelineError> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    hasher.record_str(&rel.to_string_lossy());

    let modified = path
        .metadata()
        .and_then(|m| m.modified())
        .map_err(|e| PipelineError::Source {
            path: path.to_path_buf(),
            source: e,
        })?;
    let since_epoch = modified.duration_since(UNIX_EPOCH).unwrap_or_default();
    hasher.record_u64(since_epoch.as_secs());
    hasher.record_u64(u64::from(since_epoch.subsec_nanos()));
    Ok(())
}

/// Salt covering the contents of every `.less` file under `dir`.
///
/// Returns the zero salt when the directory does not exist.
pub fn less_dir_salt(dir: &Path) -> [u8; 32] {
    if !dir.is_dir() {
        return [0; 32];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "less"))
        .collect();
    files.sort();

    let mut hasher = blake3::Hasher::new();
    for path in files {
        hasher.update(&hash_file(&path));
    }
    *hasher.finalize().as_bytes()
}

/// Streaming content hash of one file; zero hash when unreadable.
fn hash_file(path: &Path) -> [u8; 32] {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return [0; 32],
    };

    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => return [0; 32],
        }
    }

    *hasher.finalize().as_bytes()
}
