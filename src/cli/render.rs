//! `grist render`: drive one render pass and print the result.

use anyhow::Result;

use crate::core::AssetKind;
use crate::manifest::RenderManifest;
use crate::pipeline::Pipeline;
use crate::render::{self, RenderScope};

#[allow(clippy::fn_params_excessive_bools)]
pub fn run(
    pipeline: &Pipeline,
    kind: AssetKind,
    groups: &[String],
    force: bool,
    production: bool,
    tags: bool,
) -> Result<()> {
    let refs = if production {
        let manifest = RenderManifest::load_cached(pipeline.store.dir())?;
        render::render_prod(pipeline, &manifest, kind, groups, force)?
    } else {
        render::render_dev(pipeline, kind, groups, force)?
    };

    let mut scope = RenderScope::new();
    if tags {
        let markup = render::render_tags(&mut scope, kind, &pipeline.config.paths.base_url, refs);
        if !markup.is_empty() {
            println!("{markup}");
        }
    } else {
        for reference in scope.emit(refs) {
            println!("{reference}");
        }
    }
    Ok(())
}
