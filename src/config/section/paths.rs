//! `[paths]` section configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Input/output locations, all relative to the config file's directory.
///
/// # Example
///
/// ```toml
/// [paths]
/// manifest = "assets-inventory.json"
/// assets = "src/assets/images"
/// optimized = "src/assets/optimized"
/// map = "asset-map.json"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Inventory manifest produced by the site crawler.
    pub manifest: PathBuf,

    /// Root of the downloaded asset tree (one subdirectory per category).
    pub assets: PathBuf,

    /// Root of the optimized mirror tree.
    pub optimized: PathBuf,

    /// Aggregated asset map output file.
    pub map: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: "assets-inventory.json".into(),
            assets: "src/assets/images".into(),
            optimized: "src/assets/optimized".into(),
            map: "asset-map.json".into(),
        }
    }
}
