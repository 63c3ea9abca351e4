//! Interactive crop geometry: pan/zoom state and the derived
//! crop rectangle.
//!
//! This is the per-frame interactive path. Every mutation is O(1)
//! arithmetic over five floats; no pixel data is touched until the
//! session is committed and [`crate::extract`] runs.

use serde::{Deserialize, Serialize};

use crate::types::{CropRect, Dimensions, PixelRect};

/// Minimum zoom factor. 1.0 means the crop window covers the largest
/// aspect-correct rectangle that fits in the source.
pub const MIN_ZOOM: f64 = 1.0;

/// Maximum zoom factor. Caps magnification so the crop window cannot
/// shrink toward sub-pixel sizes.
pub const MAX_ZOOM: f64 = 3.0;

/// Aspect ratios used by the admin upload slots.
pub mod aspect {
    /// Square logos and avatars.
    pub const SQUARE: f64 = 1.0;
    /// Cover photography.
    pub const COVER: f64 = 16.0 / 9.0;
    /// Wide hero banners.
    pub const HERO: f64 = 16.0 / 5.0;
}

/// Ephemeral state for one crop interaction.
///
/// Holds the source dimensions, the fixed aspect ratio supplied by the
/// call site, a zoom factor in [[`MIN_ZOOM`], [`MAX_ZOOM`]], and a 2D
/// pan offset of the crop window's center relative to the source
/// center. Inputs are always clamped, never rejected, so the derived
/// rectangle is contained in the source bounds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSession {
    source: Dimensions,
    aspect: f64,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl CropSession {
    /// Open a session over `source` with a fixed aspect ratio.
    ///
    /// The session starts centered at zoom 1. A non-finite or
    /// non-positive `aspect` falls back to 1.0 (square).
    #[must_use]
    pub fn new(source: Dimensions, aspect: f64) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Self {
            source,
            aspect,
            zoom: MIN_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Source image dimensions.
    #[must_use]
    pub const fn source(&self) -> Dimensions {
        self.source
    }

    /// The fixed aspect ratio, immutable for the session's lifetime.
    #[must_use]
    pub const fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset (window center relative to source center).
    #[must_use]
    pub const fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    /// Set the zoom factor, clamped to [[`MIN_ZOOM`], [`MAX_ZOOM`]].
    ///
    /// Zooming out grows the crop window, which can shrink the legal
    /// pan range, so the pan offset is re-clamped afterwards.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MIN_ZOOM
        };
        self.clamp_pan();
    }

    /// Set the pan offset, clamped so the crop window stays inside
    /// the source.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = if x.is_finite() { x } else { 0.0 };
        self.pan_y = if y.is_finite() { y } else { 0.0 };
        self.clamp_pan();
    }

    /// Adjust the pan offset by a delta in source-pixel units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.set_pan(self.pan_x + dx, self.pan_y + dy);
    }

    /// The crop window at zoom 1: the largest rectangle with the
    /// session's aspect ratio inscribed in the source.
    fn base_size(&self) -> (f64, f64) {
        let w = f64::from(self.source.width);
        let h = f64::from(self.source.height);
        let base_w = w.min(h * self.aspect);
        (base_w, base_w / self.aspect)
    }

    /// Current crop window size (base size divided by zoom).
    fn window_size(&self) -> (f64, f64) {
        let (base_w, base_h) = self.base_size();
        (base_w / self.zoom, base_h / self.zoom)
    }

    fn clamp_pan(&mut self) {
        let (win_w, win_h) = self.window_size();
        // Half the slack around the centered window; float error can
        // make it marginally negative at zoom 1.
        let max_x = ((f64::from(self.source.width) - win_w) / 2.0).max(0.0);
        let max_y = ((f64::from(self.source.height) - win_h) / 2.0).max(0.0);
        self.pan_x = self.pan_x.clamp(-max_x, max_x);
        self.pan_y = self.pan_y.clamp(-max_y, max_y);
    }

    /// The crop rectangle in source pixel space, recomputed from the
    /// current pan/zoom state.
    #[must_use]
    pub fn crop_rect(&self) -> CropRect {
        let (win_w, win_h) = self.window_size();
        let center_x = f64::from(self.source.width) / 2.0 + self.pan_x;
        let center_y = f64::from(self.source.height) / 2.0 + self.pan_y;
        CropRect {
            x: center_x - win_w / 2.0,
            y: center_y - win_h / 2.0,
            width: win_w,
            height: win_h,
        }
    }

    /// The crop rectangle rounded to whole pixels, ready for
    /// extraction.
    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.crop_rect().to_pixels(self.source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_contained(session: &CropSession) {
        let rect = session.crop_rect();
        let source = session.source();
        assert!(
            rect.x >= -TOLERANCE,
            "left edge {} out of bounds for {source:?}",
            rect.x
        );
        assert!(
            rect.y >= -TOLERANCE,
            "top edge {} out of bounds for {source:?}",
            rect.y
        );
        assert!(
            rect.x + rect.width <= f64::from(source.width) + TOLERANCE,
            "right edge {} exceeds width {}",
            rect.x + rect.width,
            source.width
        );
        assert!(
            rect.y + rect.height <= f64::from(source.height) + TOLERANCE,
            "bottom edge {} exceeds height {}",
            rect.y + rect.height,
            source.height
        );
    }

    #[test]
    fn square_session_at_zoom_one_covers_square_source() {
        // Scenario A geometry: 2000x2000 source, aspect 1, zoom 1,
        // no pan -> the crop rect is the whole image.
        let session = CropSession::new(Dimensions::new(2000, 2000), aspect::SQUARE);
        let rect = session.crop_rect();
        assert!((rect.x).abs() < TOLERANCE);
        assert!((rect.y).abs() < TOLERANCE);
        assert!((rect.width - 2000.0).abs() < TOLERANCE);
        assert!((rect.height - 2000.0).abs() < TOLERANCE);
        assert_eq!(
            session.pixel_rect(),
            PixelRect {
                x: 0,
                y: 0,
                width: 2000,
                height: 2000,
            }
        );
    }

    #[test]
    fn hero_session_is_shorter_than_source() {
        // Scenario B geometry: 1920x1080 at 16:5 is wider than the
        // source's 16:9, so the window spans the full width and a
        // reduced height.
        let session = CropSession::new(Dimensions::new(1920, 1080), aspect::HERO);
        let rect = session.crop_rect();
        assert!((rect.width - 1920.0).abs() < TOLERANCE);
        assert!(rect.height < 1080.0);
        assert!((rect.ratio() - aspect::HERO).abs() < TOLERANCE);
    }

    #[test]
    fn tall_source_with_square_aspect_spans_width() {
        let session = CropSession::new(Dimensions::new(1000, 2000), aspect::SQUARE);
        let rect = session.crop_rect();
        assert!((rect.width - 1000.0).abs() < TOLERANCE);
        assert!((rect.height - 1000.0).abs() < TOLERANCE);
        // Centered vertically.
        assert!((rect.y - 500.0).abs() < TOLERANCE);
    }

    #[test]
    fn ratio_preserved_across_pan_and_zoom() {
        let aspects = [aspect::SQUARE, aspect::COVER, aspect::HERO, 0.75];
        let sources = [
            Dimensions::new(1920, 1080),
            Dimensions::new(640, 640),
            Dimensions::new(300, 1200),
        ];
        for &aspect in &aspects {
            for &source in &sources {
                let mut session = CropSession::new(source, aspect);
                for step in 0..20 {
                    session.set_zoom(1.0 + f64::from(step) * 0.17);
                    session.pan_by(f64::from(step * 31) - 200.0, f64::from(step * 17) - 100.0);
                    let rect = session.crop_rect();
                    assert!(
                        (rect.ratio() - aspect).abs() < 1e-6,
                        "ratio {} != {aspect} for {source:?}",
                        rect.ratio()
                    );
                    assert_contained(&session);
                }
            }
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut session = CropSession::new(Dimensions::new(100, 100), aspect::SQUARE);

        session.set_zoom(0.25);
        assert!((session.zoom() - MIN_ZOOM).abs() < f64::EPSILON);

        session.set_zoom(99.0);
        assert!((session.zoom() - MAX_ZOOM).abs() < f64::EPSILON);

        session.set_zoom(f64::NAN);
        assert!((session.zoom() - MIN_ZOOM).abs() < f64::EPSILON);

        session.set_zoom(2.0);
        assert!((session.zoom() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pan_is_clamped_to_bounds() {
        let mut session = CropSession::new(Dimensions::new(400, 300), aspect::SQUARE);
        session.set_zoom(2.0);
        // Window is 150x150; max pan is (125, 75).
        session.set_pan(10_000.0, -10_000.0);
        assert_eq!(session.pan(), (125.0, -75.0));
        assert_contained(&session);
    }

    #[test]
    fn pan_clamp_is_idempotent() {
        let mut session = CropSession::new(Dimensions::new(800, 600), aspect::COVER);
        session.set_zoom(1.7);
        session.set_pan(5_000.0, 5_000.0);
        let clamped = session.pan();
        session.set_pan(clamped.0, clamped.1);
        assert_eq!(session.pan(), clamped);
    }

    #[test]
    fn no_pan_slack_at_zoom_one() {
        // At zoom 1 the window touches two opposite edges; pan along
        // the constrained axis is zero.
        let mut session = CropSession::new(Dimensions::new(1920, 1080), aspect::COVER);
        session.set_pan(500.0, 500.0);
        assert_eq!(session.pan(), (0.0, 0.0));
    }

    #[test]
    fn zooming_out_reclamps_pan() {
        let mut session = CropSession::new(Dimensions::new(400, 400), aspect::SQUARE);
        session.set_zoom(3.0);
        session.set_pan(130.0, -130.0);
        assert_eq!(session.pan(), (130.0, -130.0));

        // Back at zoom 1 the window covers the source; no pan remains.
        session.set_zoom(1.0);
        assert_eq!(session.pan(), (0.0, 0.0));
        assert_contained(&session);
    }

    #[test]
    fn extreme_corner_pan_lands_on_corner_pixel_rect() {
        // Scenario C geometry: zoom 3, pan to an extreme corner.
        let mut session = CropSession::new(Dimensions::new(900, 900), aspect::SQUARE);
        session.set_zoom(3.0);
        session.pan_by(1e9, 1e9);
        let px = session.pixel_rect();
        assert_eq!(
            px,
            PixelRect {
                x: 600,
                y: 600,
                width: 300,
                height: 300,
            }
        );
        assert!(px.fits_within(session.source()));
    }

    #[test]
    fn invalid_aspect_falls_back_to_square() {
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let session = CropSession::new(Dimensions::new(100, 100), bad);
            assert!((session.aspect() - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn pixel_rect_dimensions_match_rounded_window() {
        let mut session = CropSession::new(Dimensions::new(1001, 997), aspect::COVER);
        session.set_zoom(1.3);
        let rect = session.crop_rect();
        let px = session.pixel_rect();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            assert_eq!(px.width, rect.width.round() as u32);
            assert_eq!(px.height, rect.height.round() as u32);
        }
        assert!(px.fits_within(session.source()));
    }

    #[test]
    fn session_serde_round_trip() {
        let mut session = CropSession::new(Dimensions::new(640, 480), aspect::COVER);
        session.set_zoom(1.5);
        session.pan_by(12.0, -7.0);
        let json = serde_json::to_string(&session).unwrap();
        let back: CropSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }
}
