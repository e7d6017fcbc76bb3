//! Aggregated asset map artifact.
//!
//! The map is the contract with the site's runtime asset layer: one JSON
//! document keyed by original source URL, plus a per-category index and
//! run-level statistics. It is written wholesale at the end of a run and
//! re-derived from scratch on the next one - there is no incremental merge.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::asset::{AssetRecord, Category};
use crate::log;
use crate::stats::DownloadStats;
use crate::utils::plural::plural_s;

/// Accumulated asset records, in manifest order.
#[derive(Debug, Default)]
pub struct AssetMap {
    records: IndexMap<String, AssetRecord>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one asset under its source URL. A manifest that repeats a URL
    /// keeps the first record (same source, same plan).
    pub fn insert(&mut self, source_url: String, record: AssetRecord) {
        self.records.entry(source_url).or_insert(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, source_url: &str) -> bool {
        self.records.contains_key(source_url)
    }

    pub fn get(&self, source_url: &str) -> Option<&AssetRecord> {
        self.records.get(source_url)
    }

    /// Per-category index, in the fixed category order. Empty categories
    /// are omitted.
    fn categorized(&self) -> IndexMap<&'static str, Vec<CategorizedRecord<'_>>> {
        let mut index = IndexMap::new();
        for category in Category::ALL {
            let records: Vec<_> = self
                .records
                .iter()
                .filter(|(_, r)| r.category == category)
                .map(|(url, record)| CategorizedRecord { url, record })
                .collect();
            if !records.is_empty() {
                index.insert(category.as_str(), records);
            }
        }
        index
    }

    /// Serialize the whole map to `path` in one write.
    pub fn write(&self, path: &Path, stats: &DownloadStats) -> Result<()> {
        let document = MapDocument {
            metadata: Metadata {
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                total_assets: self.records.len(),
                categories: Category::ALL.iter().map(|c| c.as_str()).collect(),
                download_stats: stats,
            },
            assets: &self.records,
            categorized_assets: self.categorized(),
        };

        let json = serde_json::to_string_pretty(&document)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)
            .with_context(|| format!("failed to write asset map {}", path.display()))?;

        log!(
            "map"; "wrote {} ({} asset{})",
            path.display(),
            self.records.len(),
            plural_s(self.records.len())
        );
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapDocument<'a> {
    metadata: Metadata<'a>,
    assets: &'a IndexMap<String, AssetRecord>,
    categorized_assets: IndexMap<&'static str, Vec<CategorizedRecord<'a>>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    generated_at: String,
    total_assets: usize,
    categories: Vec<&'static str>,
    download_stats: &'a DownloadStats,
}

/// A record plus its source URL, for the per-category index.
#[derive(Serialize)]
struct CategorizedRecord<'a> {
    url: &'a str,
    #[serde(flatten)]
    record: &'a AssetRecord,
}
