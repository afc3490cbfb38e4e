//! Pixel-to-millimetre conversion.

use crate::error::{Error, Result};

/// Adult interpupillary distance assumed by the calibration, in millimetres.
///
/// Every millimetre figure this crate emits is anchored on this constant, so
/// results are estimates around a population average rather than bespoke
/// optometry.
pub const INTERPUPILLARY_DISTANCE_MM: f32 = 63.0;

/// Clearance added beyond the widest lens diagonal for the temple fold, in
/// millimetres.
pub const LENS_EDGE_ALLOWANCE_MM: f32 = 32.0;

/// Conversion factor from image pixels to millimetres.
///
/// Derived from the measured pupillary distance in pixels: the one span of
/// the face whose real-world length is taken as known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    mm_per_px: f32,
}

impl PixelScale {
    /// Calibrates a scale from the pixel distance between the eye centers.
    ///
    /// Fails when that distance is zero or non-finite; a distance is a norm,
    /// so anything non-positive means the landmarks collapsed onto a point.
    pub fn from_pupillary_px(pupillary_px: f32) -> Result<Self> {
        if !pupillary_px.is_finite() || pupillary_px <= 0.0 {
            return Err(Error::DegenerateLandmarks { pupillary_px });
        }
        Ok(Self {
            mm_per_px: INTERPUPILLARY_DISTANCE_MM / pupillary_px,
        })
    }

    /// Converts a pixel length to millimetres.
    pub fn to_mm(&self, px: f32) -> f32 {
        px * self.mm_per_px
    }

    pub fn mm_per_px(&self) -> f32 {
        self.mm_per_px
    }
}
