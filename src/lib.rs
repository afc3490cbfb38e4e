//! # framefit
//!
//! Eyeglass frame fitting measurements from facial landmarks.
//!
//! Given the per-eye landmark contours a face detector produced for a
//! frontal photo, this crate:
//! - derives the fitting spans an optician works with (frame width, lens
//!   height, widest lens diagonal, pupillary distance) plus the chained
//!   X/Y/Z sizing values and the mounting height,
//! - converts everything from pixels to millimetres by assuming the average
//!   adult pupillary distance, and
//! - renders an annotated copy of the photo with one colored marker per
//!   span and a translucent readout panel.
//!
//! All millimetre figures are estimates around a population average, meant
//! for frame pre-selection rather than prescription work.
//!
//! ## Quick start
//!
//! ```rust
//! use framefit::{AnnotationRenderer, LandmarkSet, Measurement, Point2};
//!
//! let left_eye = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 5.0),
//!     Point2::new(0.0, 5.0),
//! ];
//! let right_eye = vec![
//!     Point2::new(100.0, 0.0),
//!     Point2::new(110.0, 0.0),
//!     Point2::new(110.0, 5.0),
//!     Point2::new(100.0, 5.0),
//! ];
//!
//! let landmarks = LandmarkSet::new(left_eye, right_eye, None)?;
//! let measurement = Measurement::from_landmarks(&landmarks)?;
//! println!("{measurement}");
//!
//! let photo = image::RgbImage::new(640, 480);
//! let annotated = AnnotationRenderer::new().render(&photo, &landmarks, &measurement)?;
//! # let _ = annotated;
//! # Ok::<(), framefit::Error>(())
//! ```

pub mod annotate;
pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod measure;
pub mod units;

pub use annotate::{AnnotationRenderer, RenderStyle};
pub use error::{Error, Result};
pub use landmarks::{LandmarkSet, Point2, Region};
pub use measure::Measurement;
pub use units::{PixelScale, INTERPUPILLARY_DISTANCE_MM, LENS_EDGE_ALLOWANCE_MM};
