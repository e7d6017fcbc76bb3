//! imgport - asset migration pipeline for WordPress site exports.

mod asset;
mod cli;
mod config;
mod download;
mod inventory;
mod logger;
mod map;
mod optimize;
mod pipeline;
mod stats;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, DownloadArgs, OptimizeArgs};
use config::{Engine, PipelineConfig};
use download::Fetcher;
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

    let config = PipelineConfig::load(&cli)?;

    match &cli.command {
        Commands::Run {
            download_args,
            optimize_args,
        } => run_all(&config, download_args, optimize_args),
        Commands::Download { download_args } => {
            run_download(&config, download_args).map(|_| ())
        }
        Commands::Map => run_map(&config),
        Commands::Optimize { optimize_args } => {
            optimize::run(&config, engine_for(&config, optimize_args)).map(|_| ())
        }
        Commands::Responsive { optimize_args } => {
            optimize::run_responsive(&config, engine_for(&config, optimize_args))
        }
    }
}

/// CLI flag wins over the config file.
fn engine_for(config: &PipelineConfig, args: &OptimizeArgs) -> Engine {
    args.engine.unwrap_or(config.optimize.engine)
}

// =============================================================================
// Commands
// =============================================================================

/// Full pipeline: download, optimize, responsive variants, asset map.
fn run_all(config: &PipelineConfig, download: &DownloadArgs, optimize_args: &OptimizeArgs) -> Result<()> {
    let stats = run_download(config, download)?;

    let engine = engine_for(config, optimize_args);
    optimize::run(config, engine)?;
    optimize::run_responsive(config, engine)?;

    if stats.errors > 0 {
        log!("run"; "completed with {} download error{}", stats.errors, utils::plural::plural_s(stats.errors));
    } else {
        log!("run"; "completed");
    }
    Ok(())
}

/// Download every manifest asset and write the map.
fn run_download(config: &PipelineConfig, args: &DownloadArgs) -> Result<stats::DownloadStats> {
    let entries = inventory::load(&config.manifest_path())?;

    let mut pipeline = Pipeline::new(config);
    pipeline.init_dirs()?;

    let fetcher = Fetcher::new(&config.download)?;
    pipeline.download(&entries, &fetcher, args.force);
    pipeline.finish()
}

/// Rebuild the asset map from the manifest and current disk state.
fn run_map(config: &PipelineConfig) -> Result<()> {
    let entries = inventory::load(&config.manifest_path())?;

    let mut pipeline = Pipeline::new(config);
    pipeline.map_only(&entries);
    pipeline.finish().map(|_| ())
}
