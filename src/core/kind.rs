//! Asset kind definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of asset group.
///
/// Group names are unique within their kind, so a script group and a
/// style group may share a name without conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// JavaScript sources, rendered as `<script>` tags.
    Script,
    /// Stylesheet sources, rendered as `<link>` tags.
    Style,
}

impl AssetKind {
    /// All kinds, in manifest-build order.
    pub const ALL: [Self; 2] = [Self::Script, Self::Style];

    /// File extension of compiled artifacts of this kind.
    #[inline]
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Style => "css",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "js" | "script" | "scripts" => Ok(Self::Script),
            "css" | "style" | "styles" => Ok(Self::Style),
            other => Err(format!("unknown asset kind `{other}` (expected js or css)")),
        }
    }
}
