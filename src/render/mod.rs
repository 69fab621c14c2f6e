//! Render drivers for development and production modes.
//!
//! Development resolves dependencies and builds through the cache on
//! every call; production is a pure lookup into the precomputed
//! manifest. Both feed [`RenderScope`], which guarantees no output
//! path is emitted twice within one render scope.

pub mod html;

pub use html::{render_tags, tag_for};

use rustc_hash::FxHashSet;

use crate::build;
use crate::core::{AssetKind, BuildMode, PipelineError};
use crate::group;
use crate::manifest::RenderManifest;
use crate::pipeline::Pipeline;

/// Output references already emitted in the current render scope.
///
/// A group reachable through several dependency paths must still emit
/// each `<script>`/`<link>` once. The set is strictly additive across
/// repeated calls within one scope; earlier emissions are never
/// reordered or revoked.
#[derive(Debug, Default)]
pub struct RenderScope {
    seen: FxHashSet<String>,
}

impl RenderScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the refs not yet emitted in this scope, recording them.
    pub fn emit(&mut self, refs: Vec<String>) -> Vec<String> {
        refs.into_iter()
            .filter(|r| self.seen.insert(r.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Development render: resolve dependencies, build on demand.
///
/// An empty `names` list means every configured group of the kind, in
/// declared order.
pub fn render_dev(
    pipeline: &Pipeline,
    kind: AssetKind,
    names: &[String],
    force: bool,
) -> Result<Vec<String>, PipelineError> {
    let mut registry = pipeline.registry.write();

    let requested = if names.is_empty() {
        registry.names(kind)
    } else {
        names.to_vec()
    };

    let resolved = group::resolve(
        &mut registry,
        kind,
        &requested,
        force,
        pipeline.config.build.max_depth,
    )?;

    let mut outputs = Vec::new();
    for name in &resolved {
        let Some(asset_group) = registry.get(kind, name) else {
            continue;
        };
        if !asset_group.enabled && !force {
            continue;
        }
        outputs.extend(build::ensure_built(
            asset_group,
            &pipeline.config,
            &pipeline.store,
            BuildMode::DEVELOPMENT,
        )?);
    }
    Ok(outputs)
}

/// Production render: pure manifest lookup.
///
/// Enablement comes from the flag captured at manifest-build time; no
/// resolution or compilation happens here.
pub fn render_prod(
    pipeline: &Pipeline,
    manifest: &RenderManifest,
    kind: AssetKind,
    names: &[String],
    force: bool,
) -> Result<Vec<String>, PipelineError> {
    let requested = if names.is_empty() {
        pipeline.registry.read().names(kind)
    } else {
        names.to_vec()
    };

    let mut outputs = Vec::new();
    for name in &requested {
        let Some(entry) = manifest.entry(kind, name) else {
            crate::debug!("render"; "group `{name}` not in manifest, skipped");
            continue;
        };
        if !entry.enabled && !force {
            continue;
        }
        outputs.extend(entry.files.iter().cloned());
    }
    Ok(outputs)
}
