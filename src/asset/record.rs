//! Asset map entry type.

use serde::{Deserialize, Serialize};

use super::Category;

/// One migrated asset as it appears in the aggregated asset map.
///
/// Records are terminal: computed in a single pass over the manifest and
/// never mutated after insertion. The runtime layer only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// On-disk location relative to the project root, forward slashes.
    pub local_path: String,
    /// Deduplicated filename, unique within the category directory.
    pub filename: String,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub category: Category,
    pub context: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let record = AssetRecord {
            local_path: "src/assets/images/logos/logo.png".into(),
            filename: "logo.png".into(),
            alt: "Site logo".into(),
            width: Some(400),
            height: None,
            category: Category::Logos,
            context: String::new(),
            title: String::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["localPath"], "src/assets/images/logos/logo.png");
        assert_eq!(json["category"], "logos");
        assert_eq!(json["width"], 400);
        assert!(json["height"].is_null());
    }
}
