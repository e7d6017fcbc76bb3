//! Inline `data:` URI decoding.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::FetchError;

/// Check whether a manifest source is an inline data URI.
pub fn is_data_uri(src: &str) -> bool {
    src.starts_with("data:")
}

/// Decode the base64 payload of a data URI.
///
/// Only base64-encoded payloads occur in practice (the crawler inlines
/// binary images); a URI without the `;base64` marker is rejected rather
/// than guessed at.
pub fn decode(src: &str) -> Result<Vec<u8>, FetchError> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| FetchError::DataUri("missing data: prefix".into()))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| FetchError::DataUri("missing payload separator".into()))?;

    if !meta.ends_with(";base64") {
        return Err(FetchError::DataUri(format!(
            "unsupported encoding in '{meta}'"
        )));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| FetchError::DataUri(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk\
                           YPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_is_data_uri() {
        assert!(is_data_uri("data:image/png;base64,AAAA"));
        assert!(!is_data_uri("https://example.com/a.png"));
    }

    #[test]
    fn test_decode_png_payload() {
        let uri = format!("data:image/png;base64,{PNG_B64}");
        let bytes = decode(&uri).unwrap();
        // PNG magic
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_decode_rejects_missing_separator() {
        assert!(matches!(
            decode("data:image/png;base64"),
            Err(FetchError::DataUri(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_base64_encoding() {
        assert!(matches!(
            decode("data:text/plain,hello"),
            Err(FetchError::DataUri(_))
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_payload() {
        assert!(matches!(
            decode("data:image/png;base64,!!!not-base64!!!"),
            Err(FetchError::DataUri(_))
        ));
    }
}
