//! Local filename derivation from source URLs and data URIs.

use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use url::Url;

use crate::utils::mime;
use crate::utils::path::split_name;

/// Fallback extension when none can be derived from the source.
const DEFAULT_EXT: &str = "jpg";

/// Derive a filesystem-safe filename from a source URL or data URI.
///
/// For URLs the basename of the path is taken with the query stripped and
/// percent-encoding decoded. For data URIs the extension comes from the MIME
/// subtype, with `hint` used as the name when supplied and a timestamp-based
/// name synthesized otherwise.
///
/// Every character outside `[A-Za-z0-9.-]` is replaced with `_`, the
/// extension is lowercased (stem case is preserved), and a missing extension
/// defaults to `.jpg`.
///
/// # Errors
///
/// Returns an error for unparseable URLs; the caller treats this as a
/// per-asset failure, never a fatal one.
pub fn sanitize_filename(src: &str, hint: Option<&str>) -> Result<String> {
    let raw = if let Some(rest) = src.strip_prefix("data:") {
        data_uri_name(rest, hint)
    } else {
        url_basename(src)?
    };
    Ok(normalize(&raw))
}

/// Basename of a URL path, query stripped, percent-decoded.
fn url_basename(src: &str) -> Result<String> {
    let url = Url::parse(src).with_context(|| format!("malformed source url: {src}"))?;

    let base = url.path().rsplit('/').next().unwrap_or_default();
    // Some CDN rewrites leave the parameter block inside the path segment.
    let base = base.split('?').next().unwrap_or(base);

    Ok(percent_decode_str(base).decode_utf8_lossy().into_owned())
}

/// Name for a data-URI payload: the hint when given, otherwise a
/// timestamp-based synthetic name with an extension from the MIME subtype.
fn data_uri_name(rest: &str, hint: Option<&str>) -> String {
    if let Some(hint) = hint.filter(|h| !h.is_empty()) {
        return hint.to_string();
    }

    let mime_type = rest.split([';', ',']).next().unwrap_or_default();
    let ext = mime::extension_for_mime(mime_type).unwrap_or(DEFAULT_EXT);
    let millis = chrono::Utc::now().timestamp_millis();
    format!("data-image-{millis}.{ext}")
}

/// Replace unsafe characters, lowercase the extension, guarantee one exists.
fn normalize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Directory-style URLs leave no basename at all.
    if cleaned.is_empty() {
        return format!("image.{DEFAULT_EXT}");
    }

    let (stem, ext) = split_name(&cleaned);
    if ext.is_empty() {
        format!("{cleaned}.{DEFAULT_EXT}")
    } else {
        format!("{stem}{}", ext.to_ascii_lowercase())
    }
}
