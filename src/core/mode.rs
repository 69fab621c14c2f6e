//! Build mode configuration for production/development renders.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether minification transforms run on compiled output.
    /// Still subject to the `[build] minify` config switch.
    pub minify: bool,
}

impl BuildMode {
    /// Production mode: minified artifacts for the serialized manifest.
    pub const PRODUCTION: Self = Self { minify: true };

    /// Development mode: readable output, rebuilt on demand.
    pub const DEVELOPMENT: Self = Self { minify: false };

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        !self.minify
    }
}
