//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Engine;

/// imgport asset migration CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: imgport.toml)
    #[arg(short = 'C', long, default_value = "imgport.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the full pipeline: download, optimize, responsive variants, map
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        download_args: DownloadArgs,

        #[command(flatten)]
        optimize_args: OptimizeArgs,
    },

    /// Download manifest assets and write the asset map
    #[command(visible_alias = "d")]
    Download {
        #[command(flatten)]
        download_args: DownloadArgs,
    },

    /// Rebuild the asset map from the manifest without downloading
    #[command(visible_alias = "m")]
    Map,

    /// Re-encode downloaded images into optimized variants
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        optimize_args: OptimizeArgs,
    },

    /// Generate responsive width variants of optimized images
    Responsive {
        #[command(flatten)]
        optimize_args: OptimizeArgs,
    },
}

/// Shared download arguments for Run and Download commands
#[derive(clap::Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Re-download files that already exist on disk
    #[arg(short, long)]
    pub force: bool,
}

/// Shared optimizer arguments for Run, Optimize and Responsive commands
#[derive(clap::Args, Debug, Clone)]
pub struct OptimizeArgs {
    /// Encoding engine (builtin re-encodes, copy passes originals through)
    #[arg(short, long, value_enum)]
    pub engine: Option<Engine>,
}
