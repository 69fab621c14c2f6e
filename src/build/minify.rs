//! Minification transforms for compiled artifacts.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Input that fails
//! to parse is a hard error; a broken asset must surface instead of
//! being stored and served as-is.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::core::{AssetKind, PipelineError};

/// Transform identifier recorded in script fingerprints.
pub const TRANSFORM_ID_JS: &str = "minify:oxc";

/// Transform identifier recorded in style fingerprints.
pub const TRANSFORM_ID_CSS: &str = "minify:lightningcss";

/// Minify content of the given kind.
pub fn minify(kind: AssetKind, source: &str) -> Result<String, PipelineError> {
    match kind {
        AssetKind::Script => minify_js(source),
        AssetKind::Style => minify_css(source),
    }
}

/// Minify JavaScript source code.
fn minify_js(source: &str) -> Result<String, PipelineError> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(PipelineError::TransformFailure {
            tool: "oxc",
            detail: format!("{} parse error(s)", ret.errors.len()),
        });
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
fn minify_css(source: &str) -> Result<String, PipelineError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).map_err(|e| {
        PipelineError::TransformFailure {
            tool: "lightningcss",
            detail: e.to_string(),
        }
    })?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| PipelineError::TransformFailure {
            tool: "lightningcss",
            detail: e.to_string(),
        })?;
    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_css() {
        let out = minify(AssetKind::Style, "body {\n  color: #ff0000;\n}\n").unwrap();
        assert!(out.len() < "body {\n  color: #ff0000;\n}\n".len());
        assert!(out.contains("body"));
    }

    #[test]
    fn test_minify_js() {
        let out = minify(AssetKind::Script, "const answer = 40 + 2; console.log(answer);").unwrap();
        assert!(out.contains("console.log"));
        assert!(!out.contains("answer = 40 + 2"));
    }

    #[test]
    fn test_broken_js_is_an_error() {
        let err = minify(AssetKind::Script, "function ( {").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TransformFailure { tool: "oxc", .. }
        ));
    }
}
