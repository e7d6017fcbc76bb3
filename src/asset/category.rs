//! Asset category definitions and classification heuristics.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Date-stamped upload names (`2023-07-14-pride-march.jpg`) are almost always
/// gallery photos exported straight from the CMS media library.
static DATE_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid regex"));

/// Category of a migrated asset, determines its target directory and
/// optimization preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Brand marks and partner logos.
    Logos,
    /// Editorial images (default/catch-all).
    Content,
    /// Icons, buttons, navigation chrome.
    Ui,
    /// Full-width hero/banner/carousel imagery.
    Hero,
    /// Photo gallery uploads.
    Gallery,
}

impl Category {
    /// All categories, in directory-creation and map order.
    pub const ALL: [Category; 5] = [
        Category::Logos,
        Category::Content,
        Category::Ui,
        Category::Hero,
        Category::Gallery,
    ];

    /// Directory and map key name for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logos => "logos",
            Self::Content => "content",
            Self::Ui => "ui",
            Self::Hero => "hero",
            Self::Gallery => "gallery",
        }
    }

    /// Classify an asset from its sanitized filename and manifest metadata.
    ///
    /// Checks run in a fixed order and the first match wins, so a filename
    /// containing both "logo" and "hero" files under [`Category::Logos`].
    pub fn classify(filename: &str, context: &str, alt: &str) -> Self {
        let filename_lower = filename.to_lowercase();
        let context_lower = context.to_lowercase();
        let alt_lower = alt.to_lowercase();

        if filename_lower.contains("logo")
            || context_lower.contains("logo")
            || alt_lower.contains("logo")
        {
            return Self::Logos;
        }

        if filename_lower.contains("icon")
            || filename_lower.contains("button")
            || filename_lower.contains("ui-")
            || context_lower.contains("navigation")
        {
            return Self::Ui;
        }

        if filename_lower.contains("hero")
            || filename_lower.contains("banner")
            || filename_lower.contains("carousel")
            || context_lower.contains("hero")
        {
            return Self::Hero;
        }

        if context_lower.contains("gallery")
            || alt_lower.contains("gallery")
            || DATE_STAMP.is_match(filename)
        {
            return Self::Gallery;
        }

        Self::Content
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_logo() {
        assert_eq!(Category::classify("site-logo.png", "", ""), Category::Logos);
        assert_eq!(Category::classify("photo.jpg", "header logo", ""), Category::Logos);
        assert_eq!(Category::classify("photo.jpg", "", "Company Logo"), Category::Logos);
    }

    #[test]
    fn test_classify_ui() {
        assert_eq!(Category::classify("search-icon.svg", "", ""), Category::Ui);
        assert_eq!(Category::classify("cta-button.png", "", ""), Category::Ui);
        assert_eq!(Category::classify("ui-arrow.png", "", ""), Category::Ui);
        assert_eq!(Category::classify("photo.jpg", "main navigation", ""), Category::Ui);
    }

    #[test]
    fn test_classify_hero() {
        assert_eq!(Category::classify("hero-beach.jpg", "", ""), Category::Hero);
        assert_eq!(Category::classify("summer-banner.jpg", "", ""), Category::Hero);
        assert_eq!(Category::classify("carousel-3.jpg", "", ""), Category::Hero);
        assert_eq!(Category::classify("photo.jpg", "hero section", ""), Category::Hero);
    }

    #[test]
    fn test_classify_gallery() {
        assert_eq!(Category::classify("photo.jpg", "trip gallery", ""), Category::Gallery);
        assert_eq!(Category::classify("photo.jpg", "", "gallery shot"), Category::Gallery);
        assert_eq!(Category::classify("2023-07-14-march.jpg", "", ""), Category::Gallery);
    }

    #[test]
    fn test_classify_default() {
        assert_eq!(Category::classify("photo.jpg", "", ""), Category::Content);
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(Category::classify("Main-LOGO.png", "", ""), Category::Logos);
        assert_eq!(Category::classify("photo.jpg", "HERO area", ""), Category::Hero);
    }

    #[test]
    fn test_classify_precedence() {
        // Logo check runs before hero: a name carrying both signals files
        // under logos.
        assert_eq!(Category::classify("hero-logo.png", "", ""), Category::Logos);
        // UI check runs before gallery's date pattern.
        assert_eq!(Category::classify("2023-01-01-icon.png", "", ""), Category::Ui);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Logos).unwrap(), "\"logos\"");
        let back: Category = serde_json::from_str("\"gallery\"").unwrap();
        assert_eq!(back, Category::Gallery);
    }
}
