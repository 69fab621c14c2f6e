//! Dependency resolution over named asset groups.
//!
//! Expands a requested list of group names into the full ordered
//! closure: dependencies are spliced immediately before the groups
//! that require them, and duplicates keep their first occurrence, so
//! the result is directly usable as `<script>`/`<link>` emission
//! order. Resolution is also the enablement mechanism: every group it
//! visits has its enabled flag set, which is how a disabled group
//! pulled in as a dependency becomes renderable.

use rustc_hash::FxHashSet;

use super::registry::GroupRegistry;
use crate::core::{AssetKind, PipelineError};

/// Resolve `names` into an ordered, deduplicated closure.
///
/// At the entry level, disabled groups are inert unless `force` is
/// set: they are skipped without being enabled and without their
/// dependencies expanding. A disabled group reached as somebody's
/// dependency is always pulled in and enabled, whatever `force` says.
/// Callers depend on both halves of that asymmetry: a
/// conditionally-disabled group stays dormant until forced or
/// required, never in between.
///
/// Unknown names are skipped silently. Recursion beyond `max_depth`
/// fails with [`PipelineError::DependencyDepthExceeded`], which bounds
/// cyclic chains without full cycle detection.
pub fn resolve(
    registry: &mut GroupRegistry,
    kind: AssetKind,
    names: &[String],
    force: bool,
    max_depth: usize,
) -> Result<Vec<String>, PipelineError> {
    let mut expanded = Vec::new();
    expand(registry, kind, names, force, 0, max_depth, &mut expanded)?;

    // First-occurrence dedup keeps every dependency ahead of all of
    // its dependents.
    let mut seen = FxHashSet::default();
    expanded.retain(|name| seen.insert(name.clone()));
    Ok(expanded)
}

fn expand(
    registry: &mut GroupRegistry,
    kind: AssetKind,
    names: &[String],
    force: bool,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<String>,
) -> Result<(), PipelineError> {
    if depth > max_depth {
        return Err(PipelineError::DependencyDepthExceeded {
            max: max_depth,
            names: names.to_vec(),
        });
    }

    for name in names {
        let Some(group) = registry.get(kind, name) else {
            crate::debug!("resolve"; "unknown group `{name}`, skipped");
            continue;
        };

        // Entry-level disabled groups stay dormant unless forced.
        if depth == 0 && !group.enabled && !force {
            continue;
        }

        let requires = group.requires.clone();
        registry.enable(kind, name);

        if !requires.is_empty() {
            expand(registry, kind, &requires, force, depth + 1, max_depth, out)?;
        }
        out.push(name.clone());
    }
    Ok(())
}
