//! Pipeline configuration for `imgport.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[paths]`    | Manifest, asset tree, optimized tree, map output |
//! | `[download]` | Courtesy delay, redirect cap, request timeout    |
//! | `[optimize]` | Encoding engine, responsive breakpoints          |
//!
//! The config file is optional: this is a one-shot migration tool and must
//! run in a bare checkout, so a missing `imgport.toml` means defaults. An
//! explicitly passed `-C` path that does not exist is an error.

pub mod section;

pub use section::{DownloadConfig, Engine, OptimizeConfig, PathsConfig};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::asset::Category;
use crate::cli::Cli;
use crate::debug;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "imgport.toml";

/// Root configuration structure representing imgport.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    root: PathBuf,

    /// Input/output locations
    pub paths: PathsConfig,

    /// Downloader behavior
    pub download: DownloadConfig,

    /// Optimizer behavior
    pub optimize: OptimizeConfig,
}

impl PipelineConfig {
    /// Load configuration from the CLI-selected path.
    pub fn load(cli: &Cli) -> Result<Self> {
        let path = &cli.config;

        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let config: Self = toml::from_str(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?;
            debug!("config"; "loaded {}", path.display());
            config
        } else if path != Path::new(DEFAULT_CONFIG) {
            bail!("config file not found: {}", path.display());
        } else {
            debug!("config"; "no {DEFAULT_CONFIG}, using defaults");
            Self::default()
        };

        config.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Build a config rooted at an explicit directory (tests, embedding).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Path to the inventory manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.paths.manifest)
    }

    /// Root of the downloaded asset tree.
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(&self.paths.assets)
    }

    /// Download directory for one category.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.assets_dir().join(category.as_str())
    }

    /// Root of the optimized mirror tree.
    pub fn optimized_dir(&self) -> PathBuf {
        self.root.join(&self.paths.optimized)
    }

    /// Optimized directory for one category.
    pub fn optimized_category_dir(&self, category: Category) -> PathBuf {
        self.optimized_dir().join(category.as_str())
    }

    /// Responsive-variant directory for one category.
    pub fn responsive_dir(&self, category: Category) -> PathBuf {
        self.optimized_dir().join("responsive").join(category.as_str())
    }

    /// Output path of the aggregated asset map.
    pub fn map_path(&self) -> PathBuf {
        self.root.join(&self.paths.map)
    }

    /// Map-facing path of a downloaded file: configured assets dir plus
    /// category plus filename, always with forward slashes.
    pub fn local_path(&self, category: Category, filename: &str) -> String {
        let prefix = self.paths.assets.to_string_lossy().replace('\\', "/");
        format!("{}/{}/{}", prefix.trim_end_matches('/'), category, filename)
    }
}
