//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::AssetKind;

/// Grist asset pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: grist.toml)
    #[arg(short = 'C', long, default_value = "grist.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build every group and write the production manifest
    #[command(visible_alias = "b")]
    Build,

    /// Resolve, build, and print output references for groups
    #[command(visible_alias = "r")]
    Render {
        /// Asset kind: js or css
        kind: AssetKind,

        /// Group names (all configured groups when omitted)
        groups: Vec<String>,

        /// Include disabled groups
        #[arg(short, long)]
        force: bool,

        /// Serve from the production manifest instead of resolving
        #[arg(short, long)]
        production: bool,

        /// Print full markup tags instead of bare references
        #[arg(short, long)]
        tags: bool,
    },

    /// List configured groups with their sources and dependencies
    #[command(visible_alias = "l")]
    List,
}
