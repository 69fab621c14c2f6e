//! Offline production manifest builder.
//!
//! Force-builds every configured group so a later runtime
//! force-enable can be served from the manifest alone, then captures
//! each group's force-resolved closure as a flat compiled-file list.
//! Runs out-of-band (`grist build`), never during request serving.

use rustc_hash::{FxHashMap, FxHashSet};
use std::slice;

use super::{MANIFEST_FILE, ManifestEntry, RenderManifest};
use crate::build;
use crate::core::{AssetKind, BuildMode, PipelineError};
use crate::group;
use crate::pipeline::Pipeline;
use crate::store::process;

/// Build all groups, write the manifest, and purge stale artifacts.
pub fn build_all(pipeline: &Pipeline) -> Result<RenderManifest, PipelineError> {
    let mut manifest = RenderManifest::new();
    let mut generated: FxHashSet<String> = FxHashSet::default();

    let mut registry = pipeline.registry.write();

    for kind in AssetKind::ALL {
        let names = registry.names(kind);

        // Enabled flags as configured, captured before the forced
        // resolutions below flip them.
        let configured: FxHashMap<String, bool> = names
            .iter()
            .map(|n| (n.clone(), registry.is_enabled(kind, n)))
            .collect();

        // Force-build everything regardless of enablement: production
        // must satisfy a later explicit enable of any group without a
        // fallback to runtime compilation.
        let mut built: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for name in &names {
            let Some(asset_group) = registry.get(kind, name) else {
                continue;
            };
            let files = build::ensure_built(
                asset_group,
                &pipeline.config,
                &pipeline.store,
                BuildMode::PRODUCTION,
            )?;
            generated.extend(files.iter().cloned());
            built.insert(name.clone(), files);
        }

        for name in &names {
            let closure = group::resolve(
                &mut registry,
                kind,
                slice::from_ref(name),
                true,
                pipeline.config.build.max_depth,
            )?;

            let mut files = Vec::new();
            let mut seen = FxHashSet::default();
            for member in &closure {
                let Some(member_files) = built.get(member) else {
                    continue;
                };
                for file in member_files {
                    if seen.insert(file.clone()) {
                        files.push(file.clone());
                    }
                }
            }

            manifest.insert(
                kind,
                name,
                ManifestEntry {
                    files,
                    enabled: configured.get(name).copied().unwrap_or(true),
                },
            );
        }
    }
    drop(registry);

    manifest.save(pipeline.store.dir())?;

    // The next production lookup must reload the new blob.
    process::delete(pipeline.store.dir());

    // Purge artifacts from earlier fingerprints. The just-generated
    // names plus the manifest itself are the only survivors.
    generated.insert(MANIFEST_FILE.to_string());
    let removed = pipeline.store.sweep_except(&generated)?;

    crate::log!(
        "build";
        "manifest written: {} groups, {} stale artifact(s) removed",
        manifest.len(),
        removed
    );
    Ok(manifest)
}
