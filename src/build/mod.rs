//! Content-addressed build cache.
//!
//! [`ensure_built`] guarantees at-most-one compile-and-store per
//! distinct fingerprint: the cache key is derived from everything that
//! determines the compiled bytes, so a key hit skips compilation
//! entirely, and writers racing on a miss produce identical artifacts.

mod fingerprint;
mod less;
mod minify;

pub use fingerprint::{FingerprintHasher, less_dir_salt};
pub use minify::minify;

use std::fs;

use crate::config::PipelineConfig;
use crate::core::{AssetKind, BuildMode, PipelineError};
use crate::group::AssetGroup;
use crate::store::CacheStore;

/// Build a group's output references, compiling at most once.
///
/// Returns remote URLs verbatim in declared order, followed by the
/// single cache-relative filename of the compiled local sources (LESS
/// sources compile first, then plain files, concatenated into one
/// artifact). Groups without sources return nothing; groups with only
/// remote URLs never touch the store.
pub fn ensure_built(
    group: &AssetGroup,
    config: &PipelineConfig,
    store: &dyn CacheStore,
    mode: BuildMode,
) -> Result<Vec<String>, PipelineError> {
    if group.is_empty() {
        return Ok(Vec::new());
    }

    let mut outputs = group.remote.clone();
    if !group.has_local_sources() {
        return Ok(outputs);
    }

    let minify = mode.minify && config.build.minify;
    let key = cache_key(group, config, minify)?;

    if !store.has(&key) {
        let compiled = compile(group, config, minify)?;
        store.set(&key, compiled.as_bytes())?;
        crate::debug!("build"; "compiled `{}` -> {key}", group.name);
    } else {
        crate::debug!("build"; "cache hit for `{}` ({key})", group.name);
    }

    outputs.push(key);
    Ok(outputs)
}

/// Ordered transform identifiers participating in the fingerprint.
fn transform_ids(group: &AssetGroup, minify: bool) -> Vec<&'static str> {
    let mut ids = Vec::new();
    if !group.less.is_empty() {
        ids.push(less::TRANSFORM_ID);
    }
    if minify {
        ids.push(match group.kind {
            AssetKind::Script => minify::TRANSFORM_ID_JS,
            AssetKind::Style => minify::TRANSFORM_ID_CSS,
        });
    }
    ids
}

/// Compute the content-addressed cache key for a group.
fn cache_key(
    group: &AssetGroup,
    config: &PipelineConfig,
    minify: bool,
) -> Result<String, PipelineError> {
    let mut hasher = FingerprintHasher::new();

    for name in &group.less {
        fingerprint::record_source(&mut hasher, &config.root, &config.paths.less.join(name))?;
    }
    let source_dir = config.source_dir(group.kind);
    for name in &group.files {
        fingerprint::record_source(&mut hasher, &config.root, &source_dir.join(name))?;
    }

    for id in transform_ids(group, minify) {
        hasher.record_str(id);
    }

    // Undeclared cross-file includes: any change under the less
    // directory invalidates every LESS-derived key.
    if !group.less.is_empty() {
        hasher.record_bytes(&fingerprint::less_dir_salt(&config.paths.less));
    }

    Ok(format!(
        "{}-{}.{}",
        group.name,
        hasher.digest(),
        group.kind.ext()
    ))
}

/// Concatenate and transform a group's local sources.
fn compile(
    group: &AssetGroup,
    config: &PipelineConfig,
    minify: bool,
) -> Result<String, PipelineError> {
    let mut merged = String::new();

    for name in &group.less {
        let css = less::compile_file(&config.paths.less.join(name))?;
        push_part(&mut merged, &css);
    }

    let source_dir = config.source_dir(group.kind);
    for name in &group.files {
        let path = source_dir.join(name);
        let source = fs::read_to_string(&path).map_err(|e| PipelineError::Source {
            path: path.clone(),
            source: e,
        })?;
        push_part(&mut merged, &source);
    }

    if minify {
        merged = minify::minify(group.kind, &merged)?;
    }
    Ok(merged)
}

fn push_part(merged: &mut String, part: &str) {
    merged.push_str(part);
    if !part.ends_with('\n') {
        merged.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;
    use std::path::Path;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.root = root.to_path_buf();
        config.paths.scripts = root.join("js");
        config.paths.styles = root.join("css");
        config.paths.less = root.join("less");
        config.paths.cache = root.join("cache");
        config
    }

    fn style_group(name: &str, files: &[&str], less: &[&str], remote: &[&str]) -> AssetGroup {
        AssetGroup {
            name: name.to_string(),
            kind: AssetKind::Style,
            files: files.iter().map(|s| s.to_string()).collect(),
            less: less.iter().map(|s| s.to_string()).collect(),
            remote: remote.iter().map(|s| s.to_string()).collect(),
            requires: Vec::new(),
            enabled: true,
        }
    }

    /// Store that reports every key as present, so fingerprints can be
    /// inspected without running any compile transform.
    struct HitStore;

    impl CacheStore for HitStore {
        fn has(&self, _key: &str) -> bool {
            true
        }
        fn get(&self, _key: &str) -> Result<Vec<u8>, PipelineError> {
            Ok(Vec::new())
        }
        fn set(&self, _key: &str, _bytes: &[u8]) -> Result<(), PipelineError> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_group_builds_nothing() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let store = MemStore::new();

        let group = style_group("empty", &[], &[], &[]);
        let outputs = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();
        assert!(outputs.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_remote_only_group_skips_cache() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let store = MemStore::new();

        let url = "https://cdn.example.com/grid.css";
        let group = style_group("cdn", &[], &[], &[url]);
        let outputs = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();

        assert_eq!(outputs, [url]);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_second_build_is_a_pure_cache_hit() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(config.paths.styles.clone()).unwrap();
        std::fs::write(config.paths.styles.join("a.css"), "body { color: red; }\n").unwrap();

        let store = MemStore::new();
        let group = style_group("base", &["a.css"], &[], &[]);

        let first = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();
        let second = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.write_count(), 1);

        let key = &first[0];
        assert!(key.starts_with("base-"));
        assert!(key.ends_with(".css"));
        assert!(store.get(key).unwrap().starts_with(b"body"));
    }

    #[test]
    fn test_sources_concatenate_in_declared_order() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(config.paths.styles.clone()).unwrap();
        std::fs::write(config.paths.styles.join("a.css"), ".first { }").unwrap();
        std::fs::write(config.paths.styles.join("b.css"), ".second { }").unwrap();

        let store = MemStore::new();
        let group = style_group("base", &["a.css", "b.css"], &[], &[]);
        let outputs = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();

        let merged = String::from_utf8(store.get(&outputs[0]).unwrap()).unwrap();
        let first = merged.find(".first").unwrap();
        let second = merged.find(".second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_remote_urls_precede_compiled_output() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(config.paths.styles.clone()).unwrap();
        std::fs::write(config.paths.styles.join("a.css"), "body { }").unwrap();

        let store = MemStore::new();
        let url = "https://cdn.example.com/reset.css";
        let group = style_group("mix", &["a.css"], &[], &[url]);
        let outputs = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0], url);
        assert!(outputs[1].starts_with("mix-"));
    }

    #[test]
    fn test_mtime_change_produces_new_key() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(config.paths.styles.clone()).unwrap();
        let source = config.paths.styles.join("a.css");
        std::fs::write(&source, "body { }").unwrap();

        let store = MemStore::new();
        let group = style_group("base", &["a.css"], &[], &[]);

        let first = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();

        thread::sleep(Duration::from_millis(10));
        std::fs::write(&source, "body { }").unwrap();

        let second = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_minify_participates_in_fingerprint() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(config.paths.styles.clone()).unwrap();
        std::fs::write(config.paths.styles.join("a.css"), "body { color: red; }").unwrap();

        let store = MemStore::new();
        let group = style_group("base", &["a.css"], &[], &[]);

        let dev = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap();
        let prod = ensure_built(&group, &config, &store, BuildMode::PRODUCTION).unwrap();

        assert_ne!(dev, prod);
        let prod_bytes = store.get(&prod[0]).unwrap();
        let dev_bytes = store.get(&dev[0]).unwrap();
        assert!(prod_bytes.len() < dev_bytes.len());
    }

    #[test]
    fn test_any_less_file_invalidates_less_groups() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(config.paths.less.clone()).unwrap();
        std::fs::write(config.paths.less.join("theme.less"), "@c: red;").unwrap();

        // HitStore: only fingerprints are exercised, no compiler runs.
        let group = style_group("theme", &[], &["theme.less"], &[]);
        let before = ensure_built(&group, &config, &HitStore, BuildMode::DEVELOPMENT).unwrap();

        std::fs::write(config.paths.less.join("mixins.less"), ".m { }").unwrap();
        let after = ensure_built(&group, &config, &HitStore, BuildMode::DEVELOPMENT).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let store = MemStore::new();

        let group = style_group("broken", &["gone.css"], &[], &[]);
        let err = ensure_built(&group, &config, &store, BuildMode::DEVELOPMENT).unwrap_err();
        assert!(matches!(err, PipelineError::Source { .. }));
    }
}
