//! HTML tag formatting for output references.
//!
//! Presentation layer over the core's ordered reference list: the
//! ordering and once-per-scope guarantees are decided before refs
//! reach this module.

use crate::core::AssetKind;
use crate::render::RenderScope;

/// Whether a reference is a remote URL emitted untouched.
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("//")
}

/// Resolve a reference to the URL used in markup.
fn href(base_url: &str, reference: &str) -> String {
    if is_remote(reference) {
        reference.to_string()
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), reference)
    }
}

/// Format one output reference as a markup tag.
pub fn tag_for(kind: AssetKind, base_url: &str, reference: &str) -> String {
    let href = href(base_url, reference);
    match kind {
        AssetKind::Script => format!(r#"<script src="{href}"></script>"#),
        AssetKind::Style => format!(r#"<link rel="stylesheet" href="{href}"/>"#),
    }
}

/// Render tags for the refs not yet emitted in this scope.
pub fn render_tags(
    scope: &mut RenderScope,
    kind: AssetKind,
    base_url: &str,
    refs: Vec<String>,
) -> String {
    scope
        .emit(refs)
        .iter()
        .map(|r| tag_for(kind, base_url, r))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tag() {
        let tag = tag_for(AssetKind::Script, "/cache", "app-0a1b.js");
        assert_eq!(tag, r#"<script src="/cache/app-0a1b.js"></script>"#);
    }

    #[test]
    fn test_style_tag() {
        let tag = tag_for(AssetKind::Style, "/cache/", "base-0a1b.css");
        assert_eq!(tag, r#"<link rel="stylesheet" href="/cache/base-0a1b.css"/>"#);
    }

    #[test]
    fn test_remote_reference_untouched() {
        let url = "https://cdn.example.com/grid.css";
        let tag = tag_for(AssetKind::Style, "/cache", url);
        assert!(tag.contains(r#"href="https://cdn.example.com/grid.css""#));

        assert!(is_remote("//cdn.example.com/x.js"));
        assert!(!is_remote("app-0a1b.js"));
    }

    #[test]
    fn test_render_tags_skips_already_emitted() {
        let mut scope = RenderScope::new();
        let refs = vec!["a.css".to_string(), "b.css".to_string()];

        let first = render_tags(&mut scope, AssetKind::Style, "/cache", refs);
        assert_eq!(first.lines().count(), 2);

        // Same refs again in the same scope render nothing.
        let again = render_tags(
            &mut scope,
            AssetKind::Style,
            "/cache",
            vec!["a.css".to_string()],
        );
        assert!(again.is_empty());
    }
}
