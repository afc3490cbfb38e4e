//! Planar helpers shared by the measurement and annotation passes.
//!
//! All selection scans use strict comparisons, so on ties the earliest point
//! (or pair) in contour order wins. Both passes rely on that: the annotated
//! markers must land on exactly the points the measurements were taken from.

use nalgebra::Vector2;

use crate::landmarks::Point2;

/// Euclidean distance between two points.
pub fn distance(a: Point2, b: Point2) -> f32 {
    (a - b).norm()
}

/// Arithmetic mean of a point cloud. Callers guarantee a non-empty slice;
/// an empty one yields the origin.
pub fn centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    let mut sum = Vector2::zeros();
    for p in points {
        sum += p.coords;
    }
    Point2::from(sum / points.len() as f32)
}

/// Topmost and bottommost points of a contour, in that order.
///
/// Image coordinates grow downwards, so "topmost" is the minimum `y`.
pub fn vertical_extremes(points: &[Point2]) -> (Point2, Point2) {
    let Some(&first) = points.first() else {
        return (Point2::origin(), Point2::origin());
    };
    let mut top = first;
    let mut bottom = first;
    for &p in &points[1..] {
        if p.y < top.y {
            top = p;
        }
        if p.y > bottom.y {
            bottom = p;
        }
    }
    (top, bottom)
}

/// The most distant pair of points in a contour and their separation.
///
/// Scans every pair, which is fine for eye contours of a few dozen points.
pub fn max_diagonal(points: &[Point2]) -> (Point2, Point2, f32) {
    let Some(&first) = points.first() else {
        return (Point2::origin(), Point2::origin(), 0.0);
    };
    let mut best = (first, first, 0.0f32);
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = distance(points[i], points[j]);
            if d > best.2 {
                best = (points[i], points[j], d);
            }
        }
    }
    best
}

/// Outermost corners spanned by an eyeglass frame: the first left-eye point
/// and the last right-eye point, per the detector's contour ordering.
pub fn outer_corners(left_eye: &[Point2], right_eye: &[Point2]) -> (Point2, Point2) {
    let left = left_eye.first().copied().unwrap_or_else(Point2::origin);
    let right = right_eye.last().copied().unwrap_or_else(Point2::origin);
    (left, right)
}
