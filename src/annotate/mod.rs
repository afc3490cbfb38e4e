//! Annotated rendering of fitting measurements.
//!
//! Produces the reviewer-facing overlay: one colored marker per measured
//! span drawn on the face, then a translucent readout panel along the left
//! edge listing every value. Marker geometry is re-derived through the same
//! helpers the measurement pass uses, so the lines land exactly on the
//! measured points.

mod glyphs;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use tracing::warn;

use crate::error::{Error, Result};
use crate::geometry;
use crate::landmarks::{LandmarkSet, Point2};
use crate::measure::Measurement;

/// One color per measurement field, in [`Measurement::fields`] order. The
/// same table drives the markers and the panel, so a value can be traced
/// from the readout to its line by color.
const FIELD_COLORS: [Rgb<u8>; 8] = [
    Rgb([0, 0, 255]),     // frame width
    Rgb([255, 0, 0]),     // lens height
    Rgb([0, 255, 0]),     // max diagonal
    Rgb([255, 255, 0]),   // pupillary distance
    Rgb([255, 178, 102]), // X
    Rgb([255, 102, 255]), // Y
    Rgb([178, 102, 255]), // Z
    Rgb([255, 255, 255]), // mounting height
];

const SHADOW: Rgb<u8> = Rgb([0, 0, 0]);

/// Layout knobs for the overlay.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    /// Width of the translucent readout panel, in pixels.
    pub panel_width: u32,
    /// Panel opacity over the photo, 0.0 transparent to 1.0 opaque.
    pub panel_alpha: f32,
    pub panel_color: Rgb<u8>,
    /// Top-left corner of the first readout line.
    pub text_origin: (i32, i32),
    /// Vertical distance between readout lines.
    pub line_spacing: i32,
    /// Integer scale applied to the 5x7 label font.
    pub text_scale: u32,
    /// Offset of the drop shadow behind readout text.
    pub shadow_offset: i32,
    /// Marker line thickness in pixels.
    pub marker_stroke: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            panel_width: 260,
            panel_alpha: 0.55,
            panel_color: Rgb([30, 30, 30]),
            text_origin: (20, 40),
            line_spacing: 38,
            text_scale: 2,
            shadow_offset: 2,
            marker_stroke: 2,
        }
    }
}

/// Draws measurement markers and the readout panel onto a copy of a photo.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRenderer {
    style: RenderStyle,
}

impl AnnotationRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Renders the annotated copy. The source image is left untouched.
    ///
    /// Markers go down first, then the panel is blended over the left edge,
    /// so lines crossing the panel area are dimmed with the photo.
    pub fn render(
        &self,
        image: &RgbImage,
        landmarks: &LandmarkSet,
        measurement: &Measurement,
    ) -> Result<RgbImage> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let mut canvas = image.clone();
        self.draw_markers(&mut canvas, landmarks);
        self.blend_panel(&mut canvas);
        self.draw_readout(&mut canvas, measurement);
        Ok(canvas)
    }

    fn draw_markers(&self, canvas: &mut RgbImage, landmarks: &LandmarkSet) {
        let left_eye = landmarks.left_eye();
        let right_eye = landmarks.right_eye();

        // Same scans as the measurement pass, ties included.
        let (outer_left, outer_right) = geometry::outer_corners(left_eye, right_eye);
        let (lens_top, lens_bottom) = geometry::vertical_extremes(left_eye);
        let (diagonal_a, diagonal_b, _) = geometry::max_diagonal(left_eye);
        let left_center = geometry::centroid(left_eye);
        let right_center = geometry::centroid(right_eye);

        let frame_mid = midpoint(outer_left, outer_right);
        self.draw_marker(
            canvas,
            outer_left,
            outer_right,
            FIELD_COLORS[0],
            "P+A",
            (frame_mid.x as i32, frame_mid.y as i32 - 10),
        );

        let lens_mid = midpoint(lens_top, lens_bottom);
        self.draw_marker(
            canvas,
            lens_top,
            lens_bottom,
            FIELD_COLORS[1],
            "H",
            (lens_top.x as i32 - 40, lens_mid.y as i32),
        );

        let diagonal_mid = midpoint(diagonal_a, diagonal_b);
        self.draw_marker(
            canvas,
            diagonal_a,
            diagonal_b,
            FIELD_COLORS[2],
            "MD",
            (diagonal_mid.x as i32 + 10, diagonal_mid.y as i32 - 10),
        );

        let pupil_mid = midpoint(left_center, right_center);
        self.draw_marker(
            canvas,
            left_center,
            right_center,
            FIELD_COLORS[3],
            "DP",
            (pupil_mid.x as i32, pupil_mid.y as i32 - 10),
        );
    }

    /// Draws one marker line and its short label. `anchor` is the
    /// bottom-left corner of the label text.
    fn draw_marker(
        &self,
        canvas: &mut RgbImage,
        a: Point2,
        b: Point2,
        color: Rgb<u8>,
        label: &str,
        anchor: (i32, i32),
    ) {
        self.draw_segment(canvas, a, b, color);
        let text_height = glyphs::GLYPH_HEIGHT * self.style.text_scale.max(1) as i32;
        glyphs::draw_text(
            canvas,
            anchor.0,
            anchor.1 - text_height,
            self.style.text_scale,
            color,
            label,
        );
    }

    fn draw_segment(&self, canvas: &mut RgbImage, a: Point2, b: Point2, color: Rgb<u8>) {
        // Thicken by repeating the segment at unit offsets on both axes so
        // strokes stay solid at any slope.
        let stroke = self.style.marker_stroke.max(1) as i32;
        for offset in 0..stroke {
            let d = offset as f32;
            draw_line_segment_mut(canvas, (a.x + d, a.y), (b.x + d, b.y), color);
            draw_line_segment_mut(canvas, (a.x, a.y + d), (b.x, b.y + d), color);
        }
    }

    fn blend_panel(&self, canvas: &mut RgbImage) {
        let width = self.style.panel_width.min(canvas.width());
        if width < self.style.panel_width {
            warn!(
                "readout panel clipped from {}px to the {}px image width",
                self.style.panel_width,
                canvas.width()
            );
        }
        let alpha = self.style.panel_alpha.clamp(0.0, 1.0);
        let Rgb([pr, pg, pb]) = self.style.panel_color;
        for y in 0..canvas.height() {
            for x in 0..width {
                let Rgb([r, g, b]) = *canvas.get_pixel(x, y);
                canvas.put_pixel(
                    x,
                    y,
                    Rgb([
                        blend(pr, r, alpha),
                        blend(pg, g, alpha),
                        blend(pb, b, alpha),
                    ]),
                );
            }
        }
    }

    fn draw_readout(&self, canvas: &mut RgbImage, measurement: &Measurement) {
        let (x, mut y) = self.style.text_origin;
        let shadow = self.style.shadow_offset;
        for ((label, value), color) in measurement.fields().into_iter().zip(FIELD_COLORS) {
            let line = format!("{label}: {value:.1}mm");
            glyphs::draw_text(canvas, x + shadow, y + shadow, self.style.text_scale, SHADOW, &line);
            glyphs::draw_text(canvas, x, y, self.style.text_scale, color, &line);
            y += self.style.line_spacing;
        }
    }
}

fn midpoint(a: Point2, b: Point2) -> Point2 {
    Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

fn blend(panel: u8, photo: u8, alpha: f32) -> u8 {
    (alpha * panel as f32 + (1.0 - alpha) * photo as f32).round() as u8
}
