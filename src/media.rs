//! Media - Data-URL helpers for ride photos.
//!
//! Photos are stored inline as `data:<mime>;base64,<payload>` strings,
//! the format the cropping frontend produces. The import path uses
//! [`is_data_url`] to drop malformed photo fields instead of persisting
//! junk.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode raw image bytes as a data-URL.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a data-URL into its mime type and payload bytes. Returns None
/// for anything that is not a well-formed base64 data-URL.
pub fn decode_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    if mime.is_empty() {
        return None;
    }
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}

/// Whether a string is a well-formed base64 data-URL.
pub fn is_data_url(url: &str) -> bool {
    decode_data_url(url).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes() {
        let url = encode_data_url(b"\xff\xd8\xff", "image/jpeg");
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(bytes, b"\xff\xd8\xff");
    }

    #[test]
    fn rejects_non_data_urls() {
        assert!(!is_data_url("https://example.com/photo.jpg"));
        assert!(!is_data_url("data:;base64,AAAA"));
        assert!(!is_data_url("data:image/png;base64,not-base64!"));
    }
}
