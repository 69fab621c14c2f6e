//! Pipeline configuration management for `grist.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | `[paths]`     | Source, less, and cache directories, base URL   |
//! | `[build]`     | Dependency depth bound, minification switch     |
//! | `[[scripts]]` | Script group definitions, in render order       |
//! | `[[styles]]`  | Style group definitions, in render order        |

mod error;
mod group;

pub use error::ConfigError;
pub use group::GroupEntry;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use crate::core::AssetKind;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing grist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Directory and URL settings
    #[serde(default)]
    pub paths: PathsConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Script group definitions
    #[serde(default)]
    pub scripts: Vec<GroupEntry>,

    /// Style group definitions
    #[serde(default)]
    pub styles: Vec<GroupEntry>,
}

impl PipelineConfig {
    /// Load and validate configuration from a `grist.toml` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config: Self = toml::from_str(&raw)?;

        config.config_path = path.to_path_buf();
        config.root = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        config.validate()?;
        config.normalize();
        Ok(config)
    }

    /// Configured group entries of one kind, in declared order.
    pub fn groups(&self, kind: AssetKind) -> &[GroupEntry] {
        match kind {
            AssetKind::Script => &self.scripts,
            AssetKind::Style => &self.styles,
        }
    }

    /// Source directory for plain files of one kind.
    pub fn source_dir(&self, kind: AssetKind) -> &Path {
        match kind {
            AssetKind::Script => &self.paths.scripts,
            AssetKind::Style => &self.paths.styles,
        }
    }

    /// Resolve section paths against the project root.
    fn normalize(&mut self) {
        let root = self.root.clone();
        for dir in [
            &mut self.paths.scripts,
            &mut self.paths.styles,
            &mut self.paths.less,
            &mut self.paths.cache,
        ] {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
    }

    /// Validate group definitions, collecting every problem before
    /// failing so a broken config reports all at once.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut problems: Vec<String> = Vec::new();

        for kind in AssetKind::ALL {
            let mut seen: Vec<&str> = Vec::new();
            for entry in self.groups(kind) {
                if entry.name.is_empty() {
                    problems.push(format!("[{kind}] group with empty name"));
                }
                if seen.contains(&entry.name.as_str()) {
                    problems.push(format!("[{kind}] duplicate group `{}`", entry.name));
                }
                seen.push(&entry.name);

                if kind == AssetKind::Script && !entry.less.is_empty() {
                    problems.push(format!(
                        "[js] group `{}`: less sources are only valid on style groups",
                        entry.name
                    ));
                }

                for file in entry.files.iter().chain(&entry.less) {
                    if let Some(reason) = unsafe_component(Path::new(file)) {
                        problems.push(format!(
                            "[{kind}] group `{}`: source `{file}`: {reason}",
                            entry.name
                        ));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("\n")))
        }
    }
}

/// Check a source name for components that would escape the source
/// directory.
fn unsafe_component(path: &Path) -> Option<&'static str> {
    for comp in path.components() {
        match comp {
            Component::ParentDir => return Some("parent directory '..' not allowed"),
            Component::Prefix(_) | Component::RootDir => {
                return Some("absolute paths not allowed");
            }
            _ => {}
        }
    }
    None
}

// ============================================================================
// [paths]
// ============================================================================

/// `[paths]` section: where sources live and artifacts land.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Script source directory.
    pub scripts: PathBuf,
    /// Stylesheet source directory.
    pub styles: PathBuf,
    /// LESS source directory. All `.less` files under it participate
    /// in cache invalidation, listed or not.
    pub less: PathBuf,
    /// Cache directory for compiled artifacts and the manifest.
    pub cache: PathBuf,
    /// URL prefix prepended to local output references in markup.
    pub base_url: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            scripts: "static/js".into(),
            styles: "static/css".into(),
            less: "static/less".into(),
            cache: "static/cache".into(),
            base_url: "/cache".into(),
        }
    }
}

// ============================================================================
// [build]
// ============================================================================

/// `[build]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Maximum dependency recursion depth. Bounds cyclic chains
    /// without full cycle detection.
    pub max_depth: usize,
    /// Whether production builds minify compiled output.
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            minify: true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("grist.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let config = PipelineConfig::load(&path).unwrap();

        assert_eq!(config.build.max_depth, 5);
        assert!(config.build.minify);
        assert!(config.scripts.is_empty());
        assert_eq!(config.paths.base_url, "/cache");
        // Relative section paths resolve against the config's directory.
        assert_eq!(config.paths.cache, dir.path().join("static/cache"));
    }

    #[test]
    fn test_load_groups_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[[scripts]]
name = "vendor"
files = ["jquery.js"]

[[scripts]]
name = "app"
files = ["app.js"]
requires = ["vendor"]

[[styles]]
name = "base"
less = ["theme.less"]
"#,
        );
        let config = PipelineConfig::load(&path).unwrap();

        let names: Vec<_> = config
            .groups(AssetKind::Script)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, ["vendor", "app"]);
        assert_eq!(config.groups(AssetKind::Style)[0].less, ["theme.less"]);
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[[styles]]
name = "base"

[[styles]]
name = "base"
"#,
        );
        let err = PipelineConfig::load(&path).unwrap_err();
        assert!(format!("{err}").contains("duplicate"));
    }

    #[test]
    fn test_less_on_script_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[[scripts]]
name = "app"
less = ["oops.less"]
"#,
        );
        assert!(PipelineConfig::load(&path).is_err());
    }

    #[test]
    fn test_unsafe_source_path_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[[scripts]]
name = "app"
files = ["../../etc/passwd"]
"#,
        );
        let err = PipelineConfig::load(&path).unwrap_err();
        assert!(format!("{err}").contains(".."));
    }
}
