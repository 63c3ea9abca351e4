//! Base64 data-URI encoding and parsing.
//!
//! The upload pipeline represents images as strings end to end: the
//! file reader wraps raw bytes into a data URI for preview, and the
//! final cropped payload is handed to the host as one. Hosts treat
//! the value as opaque and only ever use it as an `<img src>`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::types::CropError;

/// Fallback MIME type when a filename gives no usable hint.
const OCTET_STREAM: &str = "application/octet-stream";

/// Wrap raw bytes into a `data:<mime>;base64,<payload>` URI.
#[must_use]
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Parse a base64 data URI into its MIME type and raw bytes.
///
/// # Errors
///
/// Returns [`CropError::InvalidDataUri`] when the scheme is not
/// `data:`, the header/payload separator is missing, the encoding is
/// not base64, or the payload fails to decode.
pub fn parse(uri: &str) -> Result<(String, Vec<u8>), CropError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| CropError::InvalidDataUri("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CropError::InvalidDataUri("missing payload separator".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| CropError::InvalidDataUri("payload is not base64-encoded".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| CropError::InvalidDataUri(format!("bad base64 payload: {e}")))?;

    let mime = if mime.is_empty() { OCTET_STREAM } else { mime };
    Ok((mime.to_string(), bytes))
}

/// Guess the MIME type for an image filename from its extension.
///
/// Used only to label the preview data URI; the decoder sniffs the
/// actual content and does not trust this value.
#[must_use]
pub fn mime_for_filename(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return OCTET_STREAM;
    };
    if ext.eq_ignore_ascii_case("png") {
        "image/png"
    } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
        "image/jpeg"
    } else if ext.eq_ignore_ascii_case("webp") {
        "image/webp"
    } else if ext.eq_ignore_ascii_case("bmp") {
        "image/bmp"
    } else if ext.eq_ignore_ascii_case("gif") {
        "image/gif"
    } else {
        OCTET_STREAM
    }
}
