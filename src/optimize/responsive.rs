//! Responsive width variants of optimized images.
//!
//! Reads the optimized tree and emits `<stem>-<width>w.<ext>` copies for a
//! fixed set of breakpoint widths. Only categories that get rendered at
//! multiple layout widths are covered; logos and UI chrome ship at one size.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::GenericImageView;
use image::imageops::FilterType;

use crate::asset::Category;
use crate::config::PipelineConfig;
use crate::log;
use crate::utils::path::{ensure_dir, extension_lower, split_name};
use crate::utils::plural::plural_s;

use super::Encoder;

/// Categories that are rendered at multiple layout widths.
pub const RESPONSIVE_CATEGORIES: [Category; 3] =
    [Category::Hero, Category::Gallery, Category::Content];

/// Generate width variants of the optimized tree.
///
/// Variants that already exist are skipped, so re-runs only fill gaps. A
/// failure on one variant logs a warning and the sweep continues.
pub fn generate(config: &PipelineConfig, engine: &dyn Encoder) -> Result<()> {
    if !engine.supports_resize() {
        log!("responsive"; "{} engine cannot resize, skipping responsive variants", engine.name());
        return Ok(());
    }

    for category in RESPONSIVE_CATEGORIES {
        let input_dir = config.optimized_category_dir(category);
        if !input_dir.exists() {
            continue;
        }

        let files = variant_inputs(&input_dir)?;
        if files.is_empty() {
            continue;
        }

        let out_dir = config.responsive_dir(category);
        ensure_dir(&out_dir)?;

        log!(
            "responsive"; "{category}: {} image{} at {} width{}",
            files.len(),
            plural_s(files.len()),
            config.optimize.breakpoints.len(),
            plural_s(config.optimize.breakpoints.len())
        );

        for file in &files {
            for &width in &config.optimize.breakpoints {
                if let Err(e) = write_width_variant(file, &out_dir, width) {
                    log!(
                        "responsive"; "failed {width}w variant of {}: {e:#}",
                        file.display()
                    );
                }
            }
        }
    }

    Ok(())
}

/// Optimized outputs the responsive stage can re-read.
///
/// AVIF variants are excluded: the pipeline encodes AVIF (ravif) but has no
/// AVIF decoder, and the runtime picks the closest width per format anyway.
fn variant_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if matches!(
            extension_lower(&path).as_deref(),
            Some("webp" | "jpg" | "jpeg")
        ) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Write one `-<width>w` variant, downscaling only.
fn write_width_variant(input: &Path, out_dir: &Path, width: u32) -> Result<()> {
    let filename = input
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("non-utf8 filename: {}", input.display()))?;
    let (stem, ext) = split_name(filename);
    let output = out_dir.join(format!("{stem}-{width}w{ext}"));

    if output.exists() {
        return Ok(());
    }

    let img = image::open(input)
        .with_context(|| format!("failed to decode {}", input.display()))?;
    let resized = if img.width() > width {
        img.resize(width, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };
    resized
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}
