//! Pipeline context: configuration, group registry, artifact store.

use parking_lot::RwLock;

use crate::config::PipelineConfig;
use crate::core::{AssetKind, PipelineError};
use crate::group::GroupRegistry;
use crate::store::FsStore;

/// Everything one render or build operation needs, constructed once
/// from configuration.
///
/// The registry is the only mutable state: enable/disable calls and
/// dependency resolution flip enabled flags, so it sits behind a lock
/// rather than living as process-wide static data. Concurrent hosts
/// share one `Pipeline` safely; single-threaded tools pay one
/// uncontended lock per operation.
pub struct Pipeline {
    pub config: PipelineConfig,
    pub registry: RwLock<GroupRegistry>,
    pub store: FsStore,
}

impl Pipeline {
    /// Build the context from loaded configuration, opening the
    /// artifact store.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let registry = GroupRegistry::from_config(&config);
        let store = FsStore::open(&config.paths.cache)?;
        Ok(Self {
            config,
            registry: RwLock::new(registry),
            store,
        })
    }

    /// Explicitly enable a group. Returns false for unknown names.
    pub fn enable(&self, kind: AssetKind, name: &str) -> bool {
        self.registry.write().enable(kind, name)
    }

    /// Explicitly disable a group. Returns false for unknown names.
    pub fn disable(&self, kind: AssetKind, name: &str) -> bool {
        self.registry.write().disable(kind, name)
    }
}
