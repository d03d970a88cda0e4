//! Foundational primitives for wafer edge inspection.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`, so
//! the margin strips of a frame can be borrowed without copying.
//!
//! ## Coordinates
//! Pixel coordinates are integers with `x` to the right and `y` downward.
//! Boundary polygons are stored as [`Polygon`] values of [`Point2i`].
//!
//! ## Border Modes
//! Convolution supports clamp, constant fill, and reflect-101 behavior.

mod border;
mod error;
mod geom;
mod image;

pub use border::{BorderMode, fetch, map_index};
pub use error::Error;
pub use geom::{Point2i, Polygon, Rect};
pub use image::{Image, ImageView, to_f32};
