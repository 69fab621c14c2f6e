//! `grist list`: show configured groups.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline) -> Result<()> {
    let registry = pipeline.registry.read();
    if registry.is_empty() {
        println!("no groups configured");
        return Ok(());
    }

    for group in registry.iter() {
        let state = if group.enabled {
            "enabled".green().to_string()
        } else {
            "disabled".dimmed().to_string()
        };
        let sources = group.files.len() + group.less.len() + group.remote.len();

        print!(
            "{} {} [{state}] {sources} source(s)",
            format!("[{}]", group.kind).bright_yellow().bold(),
            group.name.bold(),
        );
        if !group.requires.is_empty() {
            print!(" requires {}", group.requires.join(", "));
        }
        println!();
    }
    Ok(())
}
