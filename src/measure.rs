//! Frame fitting measurements derived from eye landmarks.
//!
//! The pipeline is a single pass: take the pixel geometry of both eye
//! contours, calibrate a pixel scale from the pupillary distance, then
//! express every span in millimetres. Three sizing values (X, Y, Z) are
//! chained off the frame width for lens blank selection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::geometry;
use crate::landmarks::LandmarkSet;
use crate::units::{PixelScale, LENS_EDGE_ALLOWANCE_MM};

/// Fitting measurements for one face, all in millimetres.
///
/// Values are estimates anchored on the average adult pupillary distance;
/// see [`crate::units::INTERPUPILLARY_DISTANCE_MM`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Frame width ("P+A"): outer corner of the left eye to outer corner of
    /// the right eye.
    pub frame_width_mm: f32,

    /// Lens height: vertical extent of the left eye contour.
    pub lens_height_mm: f32,

    /// Longest span between any two left eye contour points.
    pub max_diagonal_mm: f32,

    /// Distance between the eye centers. Equal to the calibration constant
    /// by construction, kept for the record.
    pub pupillary_distance_mm: f32,

    /// Frame width minus pupillary distance. Negative when the frame sits
    /// inside the pupil span.
    pub x_mm: f32,

    /// X plus the maximum diagonal.
    pub y_mm: f32,

    /// Y plus the temple fold allowance.
    pub z_mm: f32,

    /// Vertical drop from the left eye center to the lens bottom.
    pub mounting_height_mm: f32,
}

impl Measurement {
    /// Derives all measurements from a validated landmark set.
    ///
    /// Fails only when the two eye centers coincide (or are otherwise
    /// non-finite), which leaves nothing to calibrate the scale against.
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Result<Self> {
        let left_eye = landmarks.left_eye();
        let right_eye = landmarks.right_eye();

        let (outer_left, outer_right) = geometry::outer_corners(left_eye, right_eye);
        let frame_width_px = geometry::distance(outer_left, outer_right);

        let (lens_top, lens_bottom) = geometry::vertical_extremes(left_eye);
        let lens_height_px = geometry::distance(lens_top, lens_bottom);

        let (_, _, max_diagonal_px) = geometry::max_diagonal(left_eye);

        let left_center = geometry::centroid(left_eye);
        let right_center = geometry::centroid(right_eye);
        let pupillary_px = geometry::distance(left_center, right_center);

        let scale = PixelScale::from_pupillary_px(pupillary_px)?;
        debug!(
            "calibrated {:.4} mm/px from a pupillary distance of {:.1}px",
            scale.mm_per_px(),
            pupillary_px
        );

        let frame_width_mm = scale.to_mm(frame_width_px);
        let pupillary_distance_mm = scale.to_mm(pupillary_px);
        let max_diagonal_mm = scale.to_mm(max_diagonal_px);

        let x_mm = frame_width_mm - pupillary_distance_mm;
        let y_mm = x_mm + max_diagonal_mm;
        let z_mm = y_mm + LENS_EDGE_ALLOWANCE_MM;

        Ok(Self {
            frame_width_mm,
            lens_height_mm: scale.to_mm(lens_height_px),
            max_diagonal_mm,
            pupillary_distance_mm,
            x_mm,
            y_mm,
            z_mm,
            mounting_height_mm: scale.to_mm((left_center.y - lens_bottom.y).abs()),
        })
    }

    /// Label and value for every field, in presentation order.
    pub fn fields(&self) -> [(&'static str, f32); 8] {
        [
            ("P+A", self.frame_width_mm),
            ("H", self.lens_height_mm),
            ("MD", self.max_diagonal_mm),
            ("DP", self.pupillary_distance_mm),
            ("X", self.x_mm),
            ("Y", self.y_mm),
            ("Z", self.z_mm),
            ("MOUNT", self.mounting_height_mm),
        ]
    }

    /// Copy with every field rounded to two decimals, the precision kept in
    /// persisted fitting records.
    pub fn rounded(&self) -> Self {
        Self {
            frame_width_mm: round2(self.frame_width_mm),
            lens_height_mm: round2(self.lens_height_mm),
            max_diagonal_mm: round2(self.max_diagonal_mm),
            pupillary_distance_mm: round2(self.pupillary_distance_mm),
            x_mm: round2(self.x_mm),
            y_mm: round2(self.y_mm),
            z_mm: round2(self.z_mm),
            mounting_height_mm: round2(self.mounting_height_mm),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, value)) in self.fields().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{label}: {value:.1}mm")?;
        }
        Ok(())
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::landmarks::Point2;

    fn eye(points: &[(f32, f32)]) -> Vec<Point2> {
        points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    /// Rectangular eye contours with centers exactly 100px apart, so the
    /// scale is 0.63 mm/px and every expected value can be done by hand.
    fn rectangle_face() -> LandmarkSet {
        LandmarkSet::new(
            eye(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]),
            eye(&[(100.0, 0.0), (110.0, 0.0), (110.0, 5.0), (100.0, 5.0)]),
            None,
        )
        .unwrap()
    }

    #[test]
    fn rectangle_face_measurements() {
        let m = Measurement::from_landmarks(&rectangle_face()).unwrap();

        // frame: (0,0) to (100,5) is sqrt(10025) px = 100.1249px
        assert!((m.frame_width_mm - 63.0787).abs() < 1e-3);
        // lens height and diagonal both resolve to sqrt(125) px
        assert!((m.lens_height_mm - 7.0436).abs() < 1e-3);
        assert!((m.max_diagonal_mm - 7.0436).abs() < 1e-3);
        assert!((m.pupillary_distance_mm - 63.0).abs() < 1e-4);
        assert!((m.x_mm - 0.0787).abs() < 1e-3);
        assert!((m.y_mm - 7.1223).abs() < 1e-3);
        assert!((m.z_mm - 39.1223).abs() < 1e-3);
        // left center y 2.5 to lens bottom y 5.0 is 2.5px
        assert!((m.mounting_height_mm - 1.575).abs() < 1e-3);
    }

    #[test]
    fn sizing_chain_holds() {
        let m = Measurement::from_landmarks(&rectangle_face()).unwrap();
        assert!((m.y_mm - m.x_mm - m.max_diagonal_mm).abs() < 1e-4);
        assert!((m.z_mm - m.y_mm - LENS_EDGE_ALLOWANCE_MM).abs() < 1e-4);
    }

    #[test]
    fn results_are_resolution_independent() {
        let original = Measurement::from_landmarks(&rectangle_face()).unwrap();

        let doubled = LandmarkSet::new(
            eye(&[(0.0, 0.0), (20.0, 0.0), (20.0, 10.0), (0.0, 10.0)]),
            eye(&[(200.0, 0.0), (220.0, 0.0), (220.0, 10.0), (200.0, 10.0)]),
            None,
        )
        .unwrap();
        let scaled = Measurement::from_landmarks(&doubled).unwrap();

        for ((_, a), (_, b)) in original.fields().iter().zip(scaled.fields().iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn narrow_frame_keeps_negative_x() {
        // Outer corners sit inside the pupil span: frame 20px, pupils 60px.
        let set = LandmarkSet::new(
            eye(&[(40.0, 0.0), (0.0, 0.0)]),
            eye(&[(100.0, 0.0), (60.0, 0.0)]),
            None,
        )
        .unwrap();
        let m = Measurement::from_landmarks(&set).unwrap();

        assert!((m.frame_width_mm - 21.0).abs() < 1e-4);
        assert!((m.x_mm + 42.0).abs() < 1e-4);
        assert!(m.y_mm.abs() < 1e-4);
        assert!((m.z_mm - 32.0).abs() < 1e-4);
    }

    #[test]
    fn horizontal_contour_has_zero_lens_height() {
        let set = LandmarkSet::new(
            eye(&[(0.0, 3.0), (5.0, 3.0), (10.0, 3.0)]),
            eye(&[(100.0, 3.0)]),
            None,
        )
        .unwrap();
        let m = Measurement::from_landmarks(&set).unwrap();
        assert_eq!(m.lens_height_mm, 0.0);
        assert_eq!(m.mounting_height_mm, 0.0);
    }

    #[test]
    fn coincident_eye_centers_are_rejected() {
        let set = LandmarkSet::new(eye(&[(5.0, 5.0)]), eye(&[(5.0, 5.0)]), None).unwrap();
        let err = Measurement::from_landmarks(&set).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateLandmarks { pupillary_px } if pupillary_px == 0.0
        ));
    }

    #[test]
    fn rounding_keeps_two_decimals_and_sign() {
        let m = Measurement {
            frame_width_mm: 12.3456,
            lens_height_mm: 7.124,
            max_diagonal_mm: 42.0,
            pupillary_distance_mm: 63.0,
            x_mm: -0.086,
            y_mm: 0.0,
            z_mm: 32.0,
            mounting_height_mm: 1.234,
        }
        .rounded();

        assert_eq!(m.frame_width_mm, 12.35);
        assert_eq!(m.lens_height_mm, 7.12);
        assert_eq!(m.x_mm, -0.09);
        assert_eq!(m.mounting_height_mm, 1.23);
    }

    #[test]
    fn fields_follow_presentation_order() {
        let m = Measurement::from_landmarks(&rectangle_face()).unwrap();
        let labels: Vec<_> = m.fields().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["P+A", "H", "MD", "DP", "X", "Y", "Z", "MOUNT"]);
    }

    #[test]
    fn display_is_one_labelled_line_per_field() {
        let m = Measurement::from_landmarks(&rectangle_face()).unwrap();
        let text = m.to_string();
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("DP: 63.0mm"));
        assert!(text.contains("Z: 39.1mm"));
    }
}
