//! Validated facial landmark input.
//!
//! Detectors hand over landmarks as named regions of ordered 2D points.
//! [`LandmarkSet`] is the validated form of that payload: both eye contours
//! are guaranteed non-empty, so downstream geometry never has to re-check.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

pub type Point2 = nalgebra::Point2<f32>;

/// Landmark regions consumed by the fitting pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    LeftEye,
    RightEye,
    NoseBridge,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::LeftEye => "left_eye",
            Region::RightEye => "right_eye",
            Region::NoseBridge => "nose_bridge",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawPoint {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct RawRegions {
    #[serde(default)]
    left_eye: Option<Vec<RawPoint>>,
    #[serde(default)]
    right_eye: Option<Vec<RawPoint>>,
    #[serde(default)]
    nose_bridge: Option<Vec<RawPoint>>,
}

/// Per-region facial landmarks in image pixel coordinates.
///
/// Contour order follows the detector contract: the first `left_eye` point is
/// the outer corner of the left eye and the last `right_eye` point is the
/// outer corner of the right eye. Coordinates grow rightwards and downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    left_eye: Vec<Point2>,
    right_eye: Vec<Point2>,
    nose_bridge: Option<Vec<Point2>>,
}

impl LandmarkSet {
    /// Builds a landmark set, rejecting absent or empty eye regions.
    ///
    /// An empty `nose_bridge` is normalized to `None`; the region is carried
    /// for collaborators but unused by the measurements themselves.
    pub fn new(
        left_eye: Vec<Point2>,
        right_eye: Vec<Point2>,
        nose_bridge: Option<Vec<Point2>>,
    ) -> Result<Self> {
        if left_eye.is_empty() {
            return Err(Error::MissingLandmarks {
                region: Region::LeftEye,
            });
        }
        if right_eye.is_empty() {
            return Err(Error::MissingLandmarks {
                region: Region::RightEye,
            });
        }
        let nose_bridge = nose_bridge.filter(|points| !points.is_empty());
        Ok(Self {
            left_eye,
            right_eye,
            nose_bridge,
        })
    }

    /// Parses the detector wire format: a JSON object mapping region names to
    /// arrays of `{"x": .., "y": ..}` points.
    ///
    /// Regions other than the three known ones are ignored, so a full
    /// detector dump (chin, eyebrows, lips, ...) can be passed through
    /// unfiltered.
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: RawRegions = serde_json::from_str(payload)?;
        let left_eye = required_points(Region::LeftEye, raw.left_eye)?;
        let right_eye = required_points(Region::RightEye, raw.right_eye)?;
        let nose_bridge = raw.nose_bridge.map(|points| convert(&points));
        Self::new(left_eye, right_eye, nose_bridge)
    }

    pub fn left_eye(&self) -> &[Point2] {
        &self.left_eye
    }

    pub fn right_eye(&self) -> &[Point2] {
        &self.right_eye
    }

    pub fn nose_bridge(&self) -> Option<&[Point2]> {
        self.nose_bridge.as_deref()
    }
}

fn required_points(region: Region, raw: Option<Vec<RawPoint>>) -> Result<Vec<Point2>> {
    match raw {
        Some(points) => Ok(convert(&points)),
        None => Err(Error::MissingLandmarks { region }),
    }
}

fn convert(raw: &[RawPoint]) -> Vec<Point2> {
    raw.iter().map(|p| Point2::new(p.x, p.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eye(points: &[(f32, f32)]) -> Vec<Point2> {
        points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn rejects_empty_left_eye() {
        let err = LandmarkSet::new(vec![], eye(&[(1.0, 1.0)]), None).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingLandmarks {
                region: Region::LeftEye
            }
        ));
    }

    #[test]
    fn rejects_empty_right_eye() {
        let err = LandmarkSet::new(eye(&[(1.0, 1.0)]), vec![], None).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingLandmarks {
                region: Region::RightEye
            }
        ));
    }

    #[test]
    fn empty_nose_bridge_is_dropped() {
        let set = LandmarkSet::new(eye(&[(1.0, 1.0)]), eye(&[(2.0, 2.0)]), Some(vec![])).unwrap();
        assert!(set.nose_bridge().is_none());
    }

    #[test]
    fn parses_wire_payload() {
        let payload = r#"{
            "left_eye": [{"x": 10.0, "y": 20.0}, {"x": 30.0, "y": 20.0}],
            "right_eye": [{"x": 90.0, "y": 20.0}],
            "nose_bridge": [{"x": 60.0, "y": 25.0}]
        }"#;
        let set = LandmarkSet::from_json(payload).unwrap();
        assert_eq!(set.left_eye().len(), 2);
        assert_eq!(set.left_eye()[0], Point2::new(10.0, 20.0));
        assert_eq!(set.right_eye().len(), 1);
        assert_eq!(set.nose_bridge().map(<[Point2]>::len), Some(1));
    }

    #[test]
    fn unknown_regions_are_ignored() {
        let payload = r#"{
            "left_eye": [{"x": 1.0, "y": 1.0}],
            "right_eye": [{"x": 2.0, "y": 1.0}],
            "chin": [{"x": 5.0, "y": 9.0}]
        }"#;
        assert!(LandmarkSet::from_json(payload).is_ok());
    }

    #[test]
    fn missing_region_key_is_reported_by_name() {
        let payload = r#"{"left_eye": [{"x": 1.0, "y": 1.0}]}"#;
        let err = LandmarkSet::from_json(payload).unwrap_err();
        assert!(err.to_string().contains("right_eye"));
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let err = LandmarkSet::from_json("not a landmark payload").unwrap_err();
        assert!(matches!(err, Error::MalformedLandmarks(_)));
    }
}
