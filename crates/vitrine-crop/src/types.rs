//! Shared types for the vitrine crop engine.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference decoded
/// raster data without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width-over-height ratio.
    ///
    /// Returns 1.0 for degenerate (zero-height) dimensions so callers
    /// never divide by zero.
    #[must_use]
    pub fn ratio(self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

/// A crop rectangle in source-image pixel space, before rounding.
///
/// Produced by [`crate::CropSession::crop_rect`] on every pan/zoom
/// change. Coordinates are fractional; [`Self::to_pixels`] rounds to
/// a whole-pixel [`PixelRect`] for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge (pixels from the left of the source).
    pub x: f64,
    /// Top edge (pixels from the top of the source).
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CropRect {
    /// Width-over-height ratio of the rectangle.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.height == 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// Round to whole pixels, clamped so the result stays inside
    /// `source` and never degenerates below 1x1.
    ///
    /// Dimensions are rounded first; the origin is then clamped so the
    /// rounded rectangle still fits. Rounding an in-bounds fractional
    /// rectangle can otherwise push an edge one pixel past the source.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_pixels(&self, source: Dimensions) -> PixelRect {
        let src_w = source.width.max(1);
        let src_h = source.height.max(1);

        let width = (self.width.round().max(1.0) as u32).min(src_w);
        let height = (self.height.round().max(1.0) as u32).min(src_h);

        let x = (self.x.round().max(0.0) as u32).min(src_w - width);
        let y = (self.y.round().max(0.0) as u32).min(src_h - height);

        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// A whole-pixel crop rectangle, guaranteed representable on screen
/// and usable directly as extraction bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Whether the rectangle lies fully within `source` bounds.
    #[must_use]
    pub const fn fits_within(self, source: Dimensions) -> bool {
        self.width > 0
            && self.height > 0
            && self.x + self.width <= source.width
            && self.y + self.height <= source.height
    }
}

/// A decoded source raster, owned by the active crop session.
///
/// Created when the user selects a file, discarded once the session
/// is confirmed or cancelled. Nothing outlives the session except the
/// final encoded payload.
#[derive(Debug, Clone)]
pub struct SourceImage {
    rgba: RgbaImage,
}

impl SourceImage {
    /// Decode raw image bytes (PNG, JPEG, BMP, WebP).
    ///
    /// # Errors
    ///
    /// Returns [`CropError::EmptyInput`] for an empty byte slice and
    /// [`CropError::Decode`] for unrecognized or truncated data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CropError> {
        if bytes.is_empty() {
            return Err(CropError::EmptyInput);
        }
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self {
            rgba: decoded.to_rgba8(),
        })
    }

    /// Decode an image carried in a base64 data URI.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidDataUri`] if the URI is malformed,
    /// plus the failures of [`Self::from_bytes`].
    pub fn from_data_uri(uri: &str) -> Result<Self, CropError> {
        let (_mime, bytes) = crate::data_uri::parse(uri)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an already-decoded RGBA buffer.
    #[must_use]
    pub const fn from_rgba(rgba: RgbaImage) -> Self {
        Self { rgba }
    }

    /// Intrinsic pixel dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.rgba.width(),
            height: self.rgba.height(),
        }
    }

    /// Borrow the decoded pixel data.
    #[must_use]
    pub const fn as_rgba(&self) -> &RgbaImage {
        &self.rgba
    }
}

/// Errors that can occur while decoding, cropping, or encoding.
///
/// All of these are recovered locally by the upload widget: the
/// in-progress transition is aborted and the committed slot value is
/// left untouched.
// Implemented by hand rather than via `thiserror::Error` because the
// `OutOfBounds::source` field holds image bounds, not an error cause,
// and the derive would otherwise treat it as `Error::source`.
#[derive(Debug)]
pub enum CropError {
    /// The input image bytes were empty.
    EmptyInput,

    /// Failed to decode the input image.
    Decode(image::ImageError),

    /// The data URI could not be parsed.
    InvalidDataUri(String),

    /// The crop rectangle does not fit inside the source image.
    OutOfBounds {
        /// The offending rectangle.
        rect: PixelRect,
        /// The source image bounds.
        source: Dimensions,
    },

    /// Encoding the cropped raster failed.
    Encode(String),
}

impl core::fmt::Display for CropError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "input image data is empty"),
            Self::Decode(err) => write!(f, "failed to decode image: {err}"),
            Self::InvalidDataUri(reason) => write!(f, "invalid data URI: {reason}"),
            Self::OutOfBounds { rect, source } => {
                write!(f, "crop rectangle {rect:?} exceeds source bounds {source:?}")
            }
            Self::Encode(reason) => write!(f, "failed to encode cropped image: {reason}"),
        }
    }
}

impl std::error::Error for CropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for CropError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err)
    }
}
