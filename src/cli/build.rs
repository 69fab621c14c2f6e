//! `grist build`: produce the production manifest.

use anyhow::Result;

use crate::manifest::builder::build_all;
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline) -> Result<()> {
    let manifest = build_all(pipeline)?;
    crate::log!(
        "build";
        "{} script group(s), {} style group(s) -> {}",
        manifest.scripts.len(),
        manifest.styles.len(),
        pipeline.store.dir().display()
    );
    Ok(())
}
