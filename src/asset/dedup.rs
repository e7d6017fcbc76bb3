//! Collision-free filename assignment.

use rustc_hash::FxHashMap;

use crate::utils::path::split_name;

/// Tracks base names seen during one run and suffixes repeats.
///
/// Keyed by stem only: `photo.jpg` and `photo.png` collide, matching the
/// flat namespace the runtime layer imports assets under. State is scoped to
/// a single pipeline invocation, so a cold re-run over an unchanged manifest
/// reproduces the same suffix sequence.
#[derive(Debug, Default)]
pub struct NameRegistry {
    seen: FxHashMap<String, u32>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `filename` unchanged on first sight of its stem, and
    /// `stem-<n>.ext` on the n-th repeat (n starting at 1).
    pub fn unique(&mut self, filename: &str) -> String {
        let (stem, ext) = split_name(filename);
        match self.seen.get_mut(stem) {
            None => {
                self.seen.insert(stem.to_string(), 1);
                filename.to_string()
            }
            Some(count) => {
                let n = *count;
                *count += 1;
                format!("{stem}-{n}{ext}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_unchanged() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.unique("photo.jpg"), "photo.jpg");
    }

    #[test]
    fn test_repeats_get_increasing_suffixes() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.unique("photo.jpg"), "photo.jpg");
        assert_eq!(registry.unique("photo.jpg"), "photo-1.jpg");
        assert_eq!(registry.unique("photo.jpg"), "photo-2.jpg");
    }

    #[test]
    fn test_stems_collide_across_extensions() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.unique("photo.jpg"), "photo.jpg");
        assert_eq!(registry.unique("photo.png"), "photo-1.png");
    }

    #[test]
    fn test_independent_stems_do_not_interfere() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.unique("a.jpg"), "a.jpg");
        assert_eq!(registry.unique("b.jpg"), "b.jpg");
        assert_eq!(registry.unique("a.jpg"), "a-1.jpg");
        assert_eq!(registry.unique("b.jpg"), "b-1.jpg");
    }

    #[test]
    fn test_extensionless_name() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.unique("README"), "README");
        assert_eq!(registry.unique("README"), "README-1");
    }
}
