//! Grist - an asset pipeline for script and stylesheet groups.

#![allow(dead_code)]

mod build;
mod cli;
mod config;
mod core;
mod group;
mod logger;
mod manifest;
mod pipeline;
mod render;
mod store;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;
use pipeline::Pipeline;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PipelineConfig::load(&cli.config)?;
    let pipeline = Pipeline::new(config)?;

    match cli.command {
        Commands::Build => cli::build::run(&pipeline),
        Commands::Render {
            kind,
            groups,
            force,
            production,
            tags,
        } => cli::render::run(&pipeline, kind, &groups, force, production, tags),
        Commands::List => cli::list::run(&pipeline),
    }
}
