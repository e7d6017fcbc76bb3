//! Run statistics and human-readable summaries.

use std::path::Path;

use serde::Serialize;

use crate::log;
use crate::optimize::OutputFormat;
use crate::utils::plural::plural_s;

// ============================================================================
// Download
// ============================================================================

/// Counters for one download (or map-only) pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadStats {
    pub downloaded: usize,
    pub skipped: usize,
    pub errors: usize,
    pub data_urls: usize,
}

impl DownloadStats {
    /// Print the end-of-stage summary.
    pub fn print_summary(&self, assets_dir: &Path) {
        log!("download"; "downloaded {} file{}", self.downloaded, plural_s(self.downloaded));
        log!("download"; "skipped {} existing file{}", self.skipped, plural_s(self.skipped));
        log!("download"; "{} error{}", self.errors, plural_s(self.errors));
        log!("download"; "{} data uri{}", self.data_urls, plural_s(self.data_urls));
        log!("download"; "assets organized in {}", assets_dir.display());
    }
}

// ============================================================================
// Optimization
// ============================================================================

/// Output files per target format.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormatCounts {
    pub avif: usize,
    pub webp: usize,
    pub jpeg: usize,
    pub png: usize,
}

impl FormatCounts {
    pub fn bump(&mut self, format: OutputFormat) {
        match format {
            OutputFormat::Avif => self.avif += 1,
            OutputFormat::Webp => self.webp += 1,
            OutputFormat::Jpeg => self.jpeg += 1,
            OutputFormat::Png => self.png += 1,
        }
    }

    fn entries(&self) -> [(&'static str, usize); 4] {
        [
            ("AVIF", self.avif),
            ("WebP", self.webp),
            ("JPEG", self.jpeg),
            ("PNG", self.png),
        ]
    }
}

/// Counters for one optimization pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptimizeStats {
    /// Source images read.
    pub processed: usize,
    /// Source images with at least one re-encoded variant.
    pub optimized: usize,
    /// Source images passed through byte-for-byte (copy engine).
    pub copied: usize,
    pub errors: usize,
    /// Total size of all source images.
    pub bytes_before: u64,
    /// Total size of all emitted variants.
    pub bytes_after: u64,
    pub formats: FormatCounts,
}

impl OptimizeStats {
    /// Overall compression ratio in percent, against the source total.
    pub fn savings_percent(&self) -> f64 {
        if self.bytes_before == 0 {
            return 0.0;
        }
        let saved = self.bytes_before.saturating_sub(self.bytes_after);
        saved as f64 / self.bytes_before as f64 * 100.0
    }

    /// Print the end-of-stage summary.
    pub fn print_summary(&self) {
        log!("optimize"; "processed {} image{}", self.processed, plural_s(self.processed));
        log!("optimize"; "optimized {} image{}", self.optimized, plural_s(self.optimized));
        if self.copied > 0 {
            log!("optimize"; "copied {} image{} without re-encoding", self.copied, plural_s(self.copied));
        }
        log!("optimize"; "{} error{}", self.errors, plural_s(self.errors));

        if self.bytes_before > 0 {
            let saved = self.bytes_before.saturating_sub(self.bytes_after);
            log!(
                "optimize"; "size reduction: {} ({:.1}%)",
                format_bytes(saved),
                self.savings_percent()
            );
            log!(
                "optimize"; "total size: {} -> {}",
                format_bytes(self.bytes_before),
                format_bytes(self.bytes_after)
            );
        }

        for (name, count) in self.formats.entries() {
            if count > 0 {
                log!("optimize"; "{name}: {count} file{}", plural_s(count));
            }
        }
    }
}

/// Format a byte count with a binary unit and one decimal.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}
