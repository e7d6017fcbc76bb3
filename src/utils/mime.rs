//! MIME type tables for image assets.
//!
//! The pipeline needs both directions: extension → MIME when probing local
//! files, and MIME → extension when naming data-URI payloads that carry no
//! filename of their own.

/// Common image MIME type constants.
pub mod types {
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";
    pub const TIFF: &str = "image/tiff";

    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Guess MIME type from a file extension string.
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext.map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("png") => types::PNG,
        Some("jpg" | "jpeg") => types::JPEG,
        Some("gif") => types::GIF,
        Some("webp") => types::WEBP,
        Some("avif") => types::AVIF,
        Some("svg") => types::SVG,
        Some("ico") => types::ICO,
        Some("bmp") => types::BMP,
        Some("tif" | "tiff") => types::TIFF,
        _ => types::OCTET_STREAM,
    }
}

/// Derive a file extension from a MIME type.
///
/// Known image types map to their canonical extension. For anything else the
/// subtype is used verbatim when it is plain alphanumeric (so future image
/// types still get a usable name); structured subtypes like `svg+xml` are
/// rejected and the caller falls back to its own default.
pub fn extension_for_mime(mime: &str) -> Option<&str> {
    let known = match mime {
        types::PNG => "png",
        types::JPEG => "jpg",
        types::GIF => "gif",
        types::WEBP => "webp",
        types::AVIF => "avif",
        types::SVG => "svg",
        types::ICO => "ico",
        types::BMP => "bmp",
        types::TIFF => "tif",
        _ => "",
    };
    if !known.is_empty() {
        return Some(known);
    }

    let subtype = mime.split('/').nth(1)?;
    if !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(subtype)
    } else {
        None
    }
}

/// Check if the MIME type represents an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(from_extension(Some("png")), types::PNG);
        assert_eq!(from_extension(Some("JPG")), types::JPEG);
        assert_eq!(from_extension(Some("jpeg")), types::JPEG);
        assert_eq!(from_extension(Some("xyz")), types::OCTET_STREAM);
        assert_eq!(from_extension(None), types::OCTET_STREAM);
    }

    #[test]
    fn test_extension_for_mime_known() {
        assert_eq!(extension_for_mime("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_mime("image/png"), Some("png"));
        assert_eq!(extension_for_mime("image/svg+xml"), Some("svg"));
        assert_eq!(extension_for_mime("image/tiff"), Some("tif"));
    }

    #[test]
    fn test_extension_for_mime_unknown_subtype() {
        // Plain alphanumeric subtypes pass through
        assert_eq!(extension_for_mime("image/heic"), Some("heic"));
        // Structured subtypes do not
        assert_eq!(extension_for_mime("application/vnd.ms-excel"), None);
        assert_eq!(extension_for_mime("garbage"), None);
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(types::PNG));
        assert!(is_image(types::AVIF));
        assert!(!is_image(types::OCTET_STREAM));
    }
}
