//! Raster extraction and final encoding.
//!
//! Copies the finalized pixel crop rectangle out of the decoded
//! source into an exact-size buffer and encodes it. Opaque output is
//! JPEG (default quality, matching the interactive use case); sources
//! carrying any transparency are written as PNG so alpha survives the
//! commit instead of being silently flattened.

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage, imageops};

use crate::types::{CropError, PixelRect, SourceImage};

/// Encoding chosen for a committed crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy default-quality encode for opaque sources.
    Jpeg,
    /// Lossless encode preserving the alpha channel.
    Png,
}

impl OutputFormat {
    /// The MIME type used in the output data URI.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Pick the format for an extracted region: PNG when any pixel is
    /// not fully opaque, JPEG otherwise.
    #[must_use]
    pub fn for_image(image: &RgbaImage) -> Self {
        if image.pixels().any(|p| p.0[3] < u8::MAX) {
            Self::Png
        } else {
            Self::Jpeg
        }
    }
}

/// Copy the sub-region `rect` of `source` into a new buffer sized
/// exactly `rect.width x rect.height`.
///
/// # Errors
///
/// Returns [`CropError::OutOfBounds`] if the rectangle is empty or
/// exceeds the source bounds. Rectangles produced by
/// [`crate::CropSession::pixel_rect`] always fit.
pub fn extract(source: &SourceImage, rect: PixelRect) -> Result<RgbaImage, CropError> {
    let dimensions = source.dimensions();
    if !rect.fits_within(dimensions) {
        return Err(CropError::OutOfBounds {
            rect,
            source: dimensions,
        });
    }
    Ok(imageops::crop_imm(source.as_rgba(), rect.x, rect.y, rect.width, rect.height).to_image())
}

/// Encode an extracted region to raw image bytes.
///
/// # Errors
///
/// Returns [`CropError::Encode`] if the codec rejects the buffer.
pub fn encode(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>, CropError> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes)
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| CropError::Encode(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel; drop it up front.
            let rgb: RgbImage = image.convert();
            JpegEncoder::new(&mut bytes)
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| CropError::Encode(e.to_string()))?;
        }
    }
    Ok(bytes)
}
