//! Filesystem path helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Create a directory and all missing parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))
}

/// Split a filename into stem and extension (dot included).
///
/// Follows basename conventions: a leading dot does not start an extension,
/// so `.gitignore` is all stem. A name without a dot has an empty extension.
///
/// - `"photo.jpg"` → `("photo", ".jpg")`
/// - `"archive.tar.gz"` → `("archive.tar", ".gz")`
/// - `"README"` → `("README", "")`
pub fn split_name(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}

/// Lowercased extension of a path, without the dot.
pub fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("photo.jpg"), ("photo", ".jpg"));
        assert_eq!(split_name("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_name("README"), ("README", ""));
        assert_eq!(split_name(".gitignore"), (".gitignore", ""));
        assert_eq!(split_name("trailing."), ("trailing", "."));
    }

    #[test]
    fn test_extension_lower() {
        assert_eq!(
            extension_lower(&PathBuf::from("Logo.PNG")),
            Some("png".to_string())
        );
        assert_eq!(extension_lower(&PathBuf::from("noext")), None);
    }

    #[test]
    fn test_ensure_dir_nested() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Idempotent
        ensure_dir(&nested).unwrap();
    }
}
