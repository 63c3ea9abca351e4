//! vitrine-crop: Pure image crop engine (sans-IO).
//!
//! Turns a user-selected raster plus interactive pan/zoom state into
//! a cropped, re-encoded image payload:
//! decode -> crop geometry -> extract -> encode -> data URI.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! bytes and strings and returns structured data. All browser
//! interaction (file picker, modal, preview) lives in `vitrine-io`.

pub mod data_uri;
pub mod extract;
pub mod flow;
pub mod geometry;
pub mod types;

pub use extract::OutputFormat;
pub use flow::{FlowError, UploadFlow};
pub use geometry::{CropSession, MAX_ZOOM, MIN_ZOOM, aspect};
pub use types::{CropError, CropRect, Dimensions, PixelRect, SourceImage};

/// Produce the final committed payload for a crop session.
///
/// Extracts `rect` from the decoded source, encodes it (JPEG for
/// opaque content, PNG when transparency is present), and wraps the
/// bytes in a data URI. The output dimensions equal the rectangle's
/// exactly; ownership of the string transfers to the caller's commit
/// callback.
///
/// # Errors
///
/// Returns [`CropError::OutOfBounds`] for a rectangle outside the
/// source and [`CropError::Encode`] if the codec fails. On error the
/// caller keeps its previous slot value.
pub fn crop_to_data_uri(source: &SourceImage, rect: PixelRect) -> Result<String, CropError> {
    let cropped = extract::extract(source, rect)?;
    let format = OutputFormat::for_image(&cropped);
    let bytes = extract::encode(&cropped, format)?;
    Ok(data_uri::encode(format.mime(), &bytes))
}
