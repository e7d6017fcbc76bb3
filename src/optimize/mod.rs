//! Image optimization over the downloaded category tree.
//!
//! Walks every category directory, re-encodes each raster image according
//! to the category's preset, and reports compression statistics. The
//! optimized tree mirrors the category layout of the download tree.

mod encoder;
mod preset;
mod responsive;

pub use encoder::{Encoder, OutputFormat, select_encoder};
pub use preset::Preset;
pub use responsive::generate as generate_responsive;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::asset::Category;
use crate::config::{Engine, PipelineConfig};
use crate::log;
use crate::logger::ProgressLine;
use crate::stats::OptimizeStats;
use crate::utils::path::{ensure_dir, extension_lower};
use crate::utils::plural::plural_s;

/// Raster formats the optimizer accepts as input.
fn is_raster_input(path: &Path) -> bool {
    matches!(
        extension_lower(path).as_deref(),
        Some("jpg" | "jpeg" | "png" | "gif")
    )
}

/// Optimize every downloaded category directory.
pub fn run(config: &PipelineConfig, engine_kind: Engine) -> Result<OptimizeStats> {
    let engine = select_encoder(engine_kind);
    let mut stats = OptimizeStats::default();

    // Collect all work lists up front so the progress line knows the total.
    let mut work: Vec<(Category, Vec<PathBuf>)> = Vec::new();
    for category in Category::ALL {
        let dir = config.category_dir(category);
        if !dir.exists() {
            continue;
        }
        let files = raster_inputs(&dir)?;
        if !files.is_empty() {
            work.push((category, files));
        }
    }

    let total: usize = work.iter().map(|(_, files)| files.len()).sum();
    if total == 0 {
        log!("optimize"; "no downloaded images to optimize");
        return Ok(stats);
    }

    log!(
        "optimize"; "re-encoding {total} image{} with {} engine",
        plural_s(total),
        engine.name()
    );
    let progress = ProgressLine::new("optimize", &[("images", total)]);

    for (category, files) in &work {
        let output_dir = config.optimized_category_dir(*category);
        ensure_dir(&output_dir)?;
        let preset = Preset::for_category(*category);

        for file in files {
            if let Err(e) = engine.process(file, &output_dir, preset, &mut stats) {
                log!("error"; "optimizing {}: {e:#}", file.display());
                stats.errors += 1;
            }
            progress.inc("images");
        }
    }

    progress.finish();
    stats.print_summary();
    Ok(stats)
}

/// Responsive variants over the optimized tree, honoring the engine choice.
pub fn run_responsive(config: &PipelineConfig, engine_kind: Engine) -> Result<()> {
    let engine = select_encoder(engine_kind);
    responsive::generate(config, engine.as_ref())
}

/// Sorted raster inputs of one category directory.
fn raster_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_raster_input(&path) {
            files.push(path);
        }
    }
    // Directory order is platform-dependent; sort so runs are reproducible.
    files.sort();
    Ok(files)
}
