//! Per-category optimization presets.

use crate::asset::Category;

/// Encoding targets for one category.
///
/// `max_width`/`max_height` bound an aspect-preserving downscale; sources
/// already inside the bounds are never enlarged. `avif` adds an AVIF
/// variant on top of the WebP + JPEG baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
    pub avif: bool,
}

/// Small and crisp: logos render at badge sizes but get linked at full
/// resolution, so quality stays high.
const LOGOS: Preset = Preset {
    quality: 90,
    max_width: 400,
    max_height: 400,
    avif: true,
};

const HERO: Preset = Preset {
    quality: 85,
    max_width: 1920,
    max_height: 1080,
    avif: true,
};

const CONTENT: Preset = Preset {
    quality: 80,
    max_width: 1200,
    max_height: 1200,
    avif: false,
};

const UI: Preset = Preset {
    quality: 90,
    max_width: 200,
    max_height: 200,
    avif: false,
};

const GALLERY: Preset = Preset {
    quality: 85,
    max_width: 800,
    max_height: 800,
    avif: true,
};

impl Preset {
    /// Preset for a category.
    pub const fn for_category(category: Category) -> &'static Preset {
        match category {
            Category::Logos => &LOGOS,
            Category::Hero => &HERO,
            Category::Content => &CONTENT,
            Category::Ui => &UI,
            Category::Gallery => &GALLERY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_preset() {
        for category in Category::ALL {
            let preset = Preset::for_category(category);
            assert!(preset.quality > 0 && preset.quality <= 100);
            assert!(preset.max_width > 0);
            assert!(preset.max_height > 0);
        }
    }

    #[test]
    fn test_avif_categories() {
        assert!(Preset::for_category(Category::Logos).avif);
        assert!(Preset::for_category(Category::Hero).avif);
        assert!(Preset::for_category(Category::Gallery).avif);
        assert!(!Preset::for_category(Category::Content).avif);
        assert!(!Preset::for_category(Category::Ui).avif);
    }
}
