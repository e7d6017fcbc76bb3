//! Pipeline orchestration.
//!
//! [`Pipeline`] owns the run-scoped state: the name registry, download
//! statistics, and the accumulating asset map. One value per invocation,
//! constructed explicitly and dropped at exit; nothing is global.

use std::path::PathBuf;

use anyhow::Result;

use crate::asset::{AssetRecord, Category, NameRegistry, sanitize_filename};
use crate::config::PipelineConfig;
use crate::download::{Fetcher, is_data_uri};
use crate::inventory::ImageEntry;
use crate::map::AssetMap;
use crate::stats::DownloadStats;
use crate::utils::path::ensure_dir;
use crate::utils::plural::plural_s;
use crate::{debug, log};

/// Run-scoped pipeline state.
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    registry: NameRegistry,
    stats: DownloadStats,
    map: AssetMap,
}

/// Naming and placement decisions for one manifest entry.
struct PlannedAsset {
    filename: String,
    category: Category,
    dest: PathBuf,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            registry: NameRegistry::new(),
            stats: DownloadStats::default(),
            map: AssetMap::new(),
        }
    }

    /// Create the assets root and every category directory.
    ///
    /// Failure here is fatal: nothing can be downloaded into a tree that
    /// could not be created.
    pub fn init_dirs(&self) -> Result<()> {
        ensure_dir(&self.config.assets_dir())?;
        for category in Category::ALL {
            ensure_dir(&self.config.category_dir(category))?;
        }
        debug!("download"; "category directories ready under {}", self.config.assets_dir().display());
        Ok(())
    }

    /// Sanitize, categorize, and deduplicate one entry.
    ///
    /// The registry is always advanced, even for assets that later skip or
    /// fail to download, so name assignment depends only on manifest order.
    fn plan(&mut self, entry: &ImageEntry) -> Result<PlannedAsset> {
        let base = sanitize_filename(&entry.src, None)?;
        let category = Category::classify(&base, &entry.context, &entry.alt);
        let filename = self.registry.unique(&base);
        let dest = self.config.category_dir(category).join(&filename);
        Ok(PlannedAsset {
            filename,
            category,
            dest,
        })
    }

    /// Insert the map record for a materialized (or already-present) asset.
    fn record(&mut self, entry: &ImageEntry, planned: &PlannedAsset) {
        let record = AssetRecord {
            local_path: self.config.local_path(planned.category, &planned.filename),
            filename: planned.filename.clone(),
            alt: entry.alt.clone(),
            width: entry.width,
            height: entry.height,
            category: planned.category,
            context: entry.context.clone(),
            title: entry.title.clone(),
        };
        self.map.insert(entry.src.clone(), record);
    }

    /// Download every manifest entry in order.
    ///
    /// Existing files are skipped (and still recorded) unless `force` is
    /// set. Any per-asset failure is counted and the loop continues.
    pub fn download(&mut self, entries: &[ImageEntry], fetcher: &Fetcher, force: bool) {
        let total = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            let planned = match self.plan(entry) {
                Ok(planned) => planned,
                Err(e) => {
                    log!("error"; "{}: {e:#}", entry.src);
                    self.stats.errors += 1;
                    continue;
                }
            };

            if !force && planned.dest.exists() {
                debug!("download"; "skipping (exists): {}", planned.filename);
                self.stats.skipped += 1;
                self.record(entry, &planned);
                continue;
            }

            log!(
                "download"; "({}/{total}) {} [{}]",
                index + 1,
                planned.filename,
                planned.category
            );

            let data_uri = is_data_uri(&entry.src);
            match fetcher.fetch(&entry.src, &planned.dest) {
                Ok(()) => {
                    if data_uri {
                        self.stats.data_urls += 1;
                    }
                    self.stats.downloaded += 1;
                    self.record(entry, &planned);
                    fetcher.courtesy_delay();
                }
                Err(e) => {
                    log!("error"; "failed to download {}: {e}", planned.filename);
                    self.stats.errors += 1;
                }
            }
        }
    }

    /// Rebuild the map from the manifest without touching the network.
    ///
    /// Every entry is recorded; `skipped` counts the files already on disk
    /// and `dataUrls` the inline sources, so the stats describe the current
    /// disk state rather than a download pass.
    pub fn map_only(&mut self, entries: &[ImageEntry]) {
        for entry in entries {
            let planned = match self.plan(entry) {
                Ok(planned) => planned,
                Err(e) => {
                    log!("error"; "{}: {e:#}", entry.src);
                    self.stats.errors += 1;
                    continue;
                }
            };

            if planned.dest.exists() {
                self.stats.skipped += 1;
            }
            if is_data_uri(&entry.src) {
                self.stats.data_urls += 1;
            }
            self.record(entry, &planned);
        }

        let count = self.map.len();
        log!("map"; "planned {count} asset{} from manifest", plural_s(count));
    }

    /// Print the download summary and write the asset map.
    pub fn finish(self) -> Result<DownloadStats> {
        self.stats.print_summary(&self.config.assets_dir());
        self.map.write(&self.config.map_path(), &self.stats)?;
        Ok(self.stats)
    }

    pub fn stats(&self) -> &DownloadStats {
        &self.stats
    }

    pub fn map(&self) -> &AssetMap {
        &self.map
    }
}
