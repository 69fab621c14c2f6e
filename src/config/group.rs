//! Declarative group definitions from `[[scripts]]` / `[[styles]]`.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// One configured asset group.
///
/// Declared order matters twice: groups render in configuration order
/// when no explicit list is requested, and source files concatenate in
/// the order they are listed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    /// Group name, unique within its kind.
    pub name: String,

    /// Local source file names, relative to the kind's source directory.
    #[serde(default)]
    pub files: Vec<String>,

    /// LESS source file names, relative to the less directory.
    /// Only meaningful for style groups.
    #[serde(default)]
    pub less: Vec<String>,

    /// Remote URLs, passed through to the output untouched.
    #[serde(default)]
    pub remote: Vec<String>,

    /// Names of groups this group depends on.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Whether the group renders by default. Disabled groups can still
    /// be pulled in as dependencies or forced explicitly.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl GroupEntry {
    /// Create a minimal entry (test fixtures).
    #[cfg(test)]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            less: Vec::new(),
            remote: Vec::new(),
            requires: Vec::new(),
            enabled: true,
        }
    }
}
