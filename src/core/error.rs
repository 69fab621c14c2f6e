//! Pipeline error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by resolution, building, and manifest loading.
///
/// A reference to a group name absent from the registry is not an
/// error: unknown names are skipped silently so that dependencies on
/// not-yet-defined or removed groups never break rendering. Every
/// other failure propagates; a missing or broken asset must not be
/// masked by partial output.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Recursion bound hit during dependency resolution. Indicates a
    /// dependency cycle or a misconfigured chain; never retried.
    #[error("dependency depth exceeded (max {max}) while resolving {names:?}")]
    DependencyDepthExceeded { max: usize, names: Vec<String> },

    /// A compile or minify transform rejected its input.
    #[error("{tool} failed: {detail}")]
    TransformFailure { tool: &'static str, detail: String },

    /// The persistent cache store is unreachable or unwritable.
    #[error("cache store unavailable at `{path}`")]
    CacheStore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Production mode could not load its manifest. Fatal: production
    /// rendering has no fallback resolution path.
    #[error("production manifest missing or unreadable at `{0}`")]
    ManifestMissing(PathBuf),

    /// A declared local source could not be read.
    #[error("failed to read source `{path}`")]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
