//! Asset inventory loading.
//!
//! The inventory is the JSON export produced by crawling the legacy site: a
//! top-level `images` array of source URLs plus whatever metadata the
//! crawler scraped alongside them (alt text, dimensions, surrounding
//! context). A missing or malformed inventory is fatal - nothing downstream
//! can run without it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::log;
use crate::utils::plural::plural_s;

/// Top-level inventory document.
#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
    pub images: Vec<ImageEntry>,
}

/// One image reference from the legacy site.
///
/// Only `src` is required; everything else defaults to empty and is carried
/// through to the asset map for categorization and accessibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageEntry {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub title: String,
}

/// Load the inventory manifest.
pub fn load(path: &Path) -> Result<Vec<ImageEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read asset inventory {}", path.display()))?;
    let inventory: Inventory = serde_json::from_str(&raw)
        .with_context(|| format!("invalid asset inventory {}", path.display()))?;

    let count = inventory.images.len();
    log!("inventory"; "found {count} image{} in {}", plural_s(count), path.display());
    Ok(inventory.images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_entries() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("assets-inventory.json");
        fs::write(
            &manifest,
            r#"{"images": [
                {"src": "https://example.com/a.jpg"},
                {"src": "https://example.com/b.png", "alt": "B", "width": 800, "height": 600,
                 "context": "hero", "title": "b"}
            ]}"#,
        )
        .unwrap();

        let images = load(&manifest).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].src, "https://example.com/a.jpg");
        assert_eq!(images[0].alt, "");
        assert_eq!(images[1].width, Some(800));
        assert_eq!(images[1].context, "hero");
    }

    #[test]
    fn test_load_ignores_extra_fields() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("assets-inventory.json");
        fs::write(
            &manifest,
            r#"{"images": [{"src": "https://example.com/a.jpg", "caption": "old caption"}]}"#,
        )
        .unwrap();

        let images = load(&manifest).unwrap();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn test_load_missing_is_fatal() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_load_malformed_is_fatal() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("assets-inventory.json");
        fs::write(&manifest, "{not json").unwrap();
        assert!(load(&manifest).is_err());
    }
}
