//! Encoding engine strategies.
//!
//! Two engines implement the same seam: [`BuiltinEncoder`] re-encodes with
//! the in-process codecs (image + ravif), [`CopyEncoder`] passes original
//! bytes through untouched. The engine is picked once at startup; nothing
//! downstream probes for capabilities.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView};

use crate::config::Engine;
use crate::stats::OptimizeStats;
use crate::utils::path::{extension_lower, split_name};
use crate::{debug, log};

/// Output formats the pipeline can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Avif,
    Webp,
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Webp => "webp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// One image-encoding strategy.
pub trait Encoder {
    fn name(&self) -> &'static str;

    /// Whether this engine can decode and resize (the responsive stage
    /// requires it).
    fn supports_resize(&self) -> bool;

    /// Process one source image into `output_dir`, updating `stats`.
    ///
    /// A failure of one target format is logged and the remaining formats
    /// still run; only failures to read the source bubble up.
    fn process(
        &self,
        input: &Path,
        output_dir: &Path,
        preset: &super::Preset,
        stats: &mut OptimizeStats,
    ) -> Result<()>;
}

/// Select the engine once at startup.
pub fn select_encoder(engine: Engine) -> Box<dyn Encoder> {
    match engine {
        Engine::Builtin => Box::new(BuiltinEncoder),
        Engine::Copy => Box::new(CopyEncoder),
    }
}

// ============================================================================
// Builtin engine (image + ravif)
// ============================================================================

pub struct BuiltinEncoder;

impl Encoder for BuiltinEncoder {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn supports_resize(&self) -> bool {
        true
    }

    fn process(
        &self,
        input: &Path,
        output_dir: &Path,
        preset: &super::Preset,
        stats: &mut OptimizeStats,
    ) -> Result<()> {
        let filename = file_name(input)?;
        let original_size = fs::metadata(input)
            .with_context(|| format!("failed to stat {}", input.display()))?
            .len();

        stats.processed += 1;
        stats.bytes_before += original_size;

        let img = image::open(input)
            .with_context(|| format!("failed to decode {}", input.display()))?;
        let img = bounded_resize(img, preset.max_width, preset.max_height);
        let (stem, _) = split_name(filename);

        let mut formats = Vec::with_capacity(4);
        if preset.avif {
            formats.push(OutputFormat::Avif);
        }
        formats.push(OutputFormat::Webp);
        formats.push(OutputFormat::Jpeg);
        // A PNG source also keeps a recompressed copy of its own format.
        if extension_lower(input).as_deref() == Some("png") {
            formats.push(OutputFormat::Png);
        }

        let mut best: Option<(OutputFormat, u64)> = None;
        for format in formats {
            let output = output_dir.join(format!("{stem}.{}", format.extension()));
            match write_format(&img, &output, format, preset.quality) {
                Ok(size) => {
                    stats.formats.bump(format);
                    stats.bytes_after += size;
                    if best.is_none_or(|(_, smallest)| size < smallest) {
                        best = Some((format, size));
                    }
                }
                Err(e) => {
                    log!(
                        "optimize"; "failed to encode {} as {}: {e:#}",
                        filename,
                        format.extension()
                    );
                }
            }
        }

        match best {
            Some((format, size)) => {
                let ratio = if original_size > 0 {
                    (original_size as f64 - size as f64) / original_size as f64 * 100.0
                } else {
                    0.0
                };
                debug!(
                    "optimize"; "{filename} -> {} ({ratio:.1}% smaller)",
                    format.extension()
                );
                stats.optimized += 1;
            }
            None => {
                log!("error"; "no variant could be encoded for {filename}");
                stats.errors += 1;
            }
        }

        Ok(())
    }
}

/// Downscale to fit within the bounds, preserving aspect ratio.
/// Sources already inside the bounds pass through untouched.
fn bounded_resize(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max_width && height <= max_height {
        img
    } else {
        img.resize(max_width, max_height, FilterType::Lanczos3)
    }
}

/// Encode one target format and return the written file size.
fn write_format(
    img: &DynamicImage,
    output: &Path,
    format: OutputFormat,
    quality: u8,
) -> Result<u64> {
    match format {
        OutputFormat::Avif => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            let pixels: Vec<ravif::RGBA8> = rgba
                .as_raw()
                .chunks_exact(4)
                .map(|c| ravif::RGBA8::new(c[0], c[1], c[2], c[3]))
                .collect();

            let encoded = ravif::Encoder::new()
                .with_quality(f32::from(quality))
                .with_speed(4)
                .encode_rgba(ravif::Img::new(&pixels, width as usize, height as usize))?;
            fs::write(output, encoded.avif_file)?;
        }
        OutputFormat::Webp => {
            // image 0.25 ships only a lossless WebP encoder; quality applies
            // to JPEG and AVIF.
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            let writer = BufWriter::new(File::create(output)?);
            WebPEncoder::new_lossless(writer).encode(
                rgba.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = img.to_rgb8();
            let writer = BufWriter::new(File::create(output)?);
            let mut encoder = JpegEncoder::new_with_quality(writer, quality);
            encoder.encode_image(&rgb)?;
        }
        OutputFormat::Png => {
            let writer = BufWriter::new(File::create(output)?);
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
            img.write_with_encoder(encoder)?;
        }
    }

    Ok(fs::metadata(output)?.len())
}

// ============================================================================
// Copy engine (passthrough)
// ============================================================================

pub struct CopyEncoder;

impl Encoder for CopyEncoder {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn supports_resize(&self) -> bool {
        false
    }

    fn process(
        &self,
        input: &Path,
        output_dir: &Path,
        _preset: &super::Preset,
        stats: &mut OptimizeStats,
    ) -> Result<()> {
        let filename = file_name(input)?;
        let output = output_dir.join(filename);
        fs::copy(input, &output)
            .with_context(|| format!("failed to copy {}", input.display()))?;

        stats.processed += 1;
        stats.copied += 1;
        debug!("optimize"; "copied {filename} (no re-encode)");
        Ok(())
    }
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("non-utf8 filename: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::Preset;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, Rgba([120, 80, 200, 255]));
        img.save(path).unwrap();
    }

    const SMALL_PRESET: Preset = Preset {
        quality: 80,
        max_width: 64,
        max_height: 64,
        avif: false,
    };

    #[test]
    fn test_bounded_resize_never_upscales() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(30, 20));
        let out = bounded_resize(img, 100, 100);
        assert_eq!(out.dimensions(), (30, 20));
    }

    #[test]
    fn test_bounded_resize_downscales_preserving_aspect() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(100, 50));
        let out = bounded_resize(img, 50, 50);
        assert_eq!(out.dimensions(), (50, 25));
    }

    #[test]
    fn test_builtin_emits_baseline_and_png_for_png_source() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("photo.png");
        write_png(&input, 16, 16);
        let out_dir = dir.path().join("optimized");
        fs::create_dir_all(&out_dir).unwrap();

        let mut stats = OptimizeStats::default();
        BuiltinEncoder
            .process(&input, &out_dir, &SMALL_PRESET, &mut stats)
            .unwrap();

        assert!(out_dir.join("photo.webp").exists());
        assert!(out_dir.join("photo.jpg").exists());
        assert!(out_dir.join("photo.png").exists());
        assert!(!out_dir.join("photo.avif").exists());
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.optimized, 1);
        assert_eq!(stats.formats.webp, 1);
        assert_eq!(stats.formats.jpeg, 1);
        assert_eq!(stats.formats.png, 1);
        assert!(stats.bytes_before > 0);
        assert!(stats.bytes_after > 0);
    }

    #[test]
    fn test_builtin_emits_avif_when_preset_asks() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("hero.png");
        write_png(&input, 8, 8);
        let out_dir = dir.path().join("optimized");
        fs::create_dir_all(&out_dir).unwrap();

        let preset = Preset {
            avif: true,
            ..SMALL_PRESET
        };
        let mut stats = OptimizeStats::default();
        BuiltinEncoder
            .process(&input, &out_dir, &preset, &mut stats)
            .unwrap();

        assert!(out_dir.join("hero.avif").exists());
        assert_eq!(stats.formats.avif, 1);
    }

    #[test]
    fn test_builtin_output_never_upscaled() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("tiny.png");
        write_png(&input, 10, 6);
        let out_dir = dir.path().join("optimized");
        fs::create_dir_all(&out_dir).unwrap();

        let mut stats = OptimizeStats::default();
        BuiltinEncoder
            .process(&input, &out_dir, &SMALL_PRESET, &mut stats)
            .unwrap();

        let out = image::open(out_dir.join("tiny.png")).unwrap();
        assert_eq!(out.dimensions(), (10, 6));
    }

    #[test]
    fn test_builtin_bounds_large_source() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("big.png");
        write_png(&input, 128, 64);
        let out_dir = dir.path().join("optimized");
        fs::create_dir_all(&out_dir).unwrap();

        let mut stats = OptimizeStats::default();
        BuiltinEncoder
            .process(&input, &out_dir, &SMALL_PRESET, &mut stats)
            .unwrap();

        let out = image::open(out_dir.join("big.png")).unwrap();
        assert_eq!(out.dimensions(), (64, 32));
    }

    #[test]
    fn test_copy_engine_preserves_bytes() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("photo.png");
        write_png(&input, 16, 16);
        let out_dir = dir.path().join("optimized");
        fs::create_dir_all(&out_dir).unwrap();

        let mut stats = OptimizeStats::default();
        CopyEncoder
            .process(&input, &out_dir, &SMALL_PRESET, &mut stats)
            .unwrap();

        let output = out_dir.join("photo.png");
        assert_eq!(fs::read(&input).unwrap(), fs::read(&output).unwrap());
        assert_eq!(stats.copied, 1);
        assert_eq!(stats.optimized, 0);
    }

    #[test]
    fn test_unreadable_source_is_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.png");
        fs::write(&input, b"not a png").unwrap();
        let out_dir = dir.path().join("optimized");
        fs::create_dir_all(&out_dir).unwrap();

        let mut stats = OptimizeStats::default();
        let result = BuiltinEncoder.process(&input, &out_dir, &SMALL_PRESET, &mut stats);
        assert!(result.is_err());
    }
}
