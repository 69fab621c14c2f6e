//! Group registry: declarative asset groups plus runtime enablement.

use rustc_hash::FxHashMap;

use crate::config::{GroupEntry, PipelineConfig};
use crate::core::AssetKind;

/// A named collection of same-kind source references sharing
/// enablement and dependency metadata.
///
/// Constructed once from configuration. The `enabled` flag is the only
/// mutable part: explicit enable/disable calls flip it, and dependency
/// resolution sets it on every group it pulls in.
#[derive(Debug, Clone)]
pub struct AssetGroup {
    pub name: String,
    pub kind: AssetKind,
    /// Plain local sources, relative to the kind's source directory.
    pub files: Vec<String>,
    /// LESS sources, relative to the less directory (style groups only).
    pub less: Vec<String>,
    /// Remote URLs, emitted verbatim.
    pub remote: Vec<String>,
    /// Dependency group names within the same kind.
    pub requires: Vec<String>,
    pub enabled: bool,
}

impl AssetGroup {
    pub fn from_entry(entry: &GroupEntry, kind: AssetKind) -> Self {
        Self {
            name: entry.name.clone(),
            kind,
            files: entry.files.clone(),
            less: entry.less.clone(),
            remote: entry.remote.clone(),
            requires: entry.requires.clone(),
            enabled: entry.enabled,
        }
    }

    /// Whether any local sources need compiling.
    #[inline]
    pub fn has_local_sources(&self) -> bool {
        !self.files.is_empty() || !self.less.is_empty()
    }

    /// Whether the group has no sources of any sort. Empty groups are
    /// valid (pure grouping nodes) and build to nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.has_local_sources() && self.remote.is_empty()
    }
}

/// Registry of all configured groups, keyed by kind and name.
///
/// # Invariants
/// - Declared order is preserved per kind; rendering without an
///   explicit group list walks configuration order.
/// - The name index is always consistent with the group vector.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: Vec<AssetGroup>,
    index: FxHashMap<(AssetKind, String), usize>,
}

impl GroupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut registry = Self::new();
        for kind in AssetKind::ALL {
            for entry in config.groups(kind) {
                registry.insert(AssetGroup::from_entry(entry, kind));
            }
        }
        registry
    }

    /// Insert a group, replacing any previous group with the same key.
    pub fn insert(&mut self, group: AssetGroup) {
        let key = (group.kind, group.name.clone());
        match self.index.get(&key) {
            Some(&i) => self.groups[i] = group,
            None => {
                self.index.insert(key, self.groups.len());
                self.groups.push(group);
            }
        }
    }

    pub fn get(&self, kind: AssetKind, name: &str) -> Option<&AssetGroup> {
        self.index
            .get(&(kind, name.to_string()))
            .map(|&i| &self.groups[i])
    }

    pub fn get_mut(&mut self, kind: AssetKind, name: &str) -> Option<&mut AssetGroup> {
        self.index
            .get(&(kind, name.to_string()))
            .map(|&i| &mut self.groups[i])
    }

    /// All group names of one kind, in declared order.
    pub fn names(&self, kind: AssetKind) -> Vec<String> {
        self.groups
            .iter()
            .filter(|g| g.kind == kind)
            .map(|g| g.name.clone())
            .collect()
    }

    /// Mark a group enabled. Returns false for unknown names.
    pub fn enable(&mut self, kind: AssetKind, name: &str) -> bool {
        match self.get_mut(kind, name) {
            Some(group) => {
                group.enabled = true;
                true
            }
            None => false,
        }
    }

    /// Mark a group disabled. Returns false for unknown names.
    pub fn disable(&mut self, kind: AssetKind, name: &str) -> bool {
        match self.get_mut(kind, name) {
            Some(group) => {
                group.enabled = false;
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self, kind: AssetKind, name: &str) -> bool {
        self.get(kind, name).is_some_and(|g| g.enabled)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate all groups in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetGroup> {
        self.groups.iter()
    }
}
