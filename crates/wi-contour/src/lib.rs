//! Outer boundary tracing for thresholded wafer frames.
//!
//! The tracer follows the outer border of each 8-connected foreground
//! component (Suzuki-style border following) and keeps every boundary pixel,
//! so consecutive vertices always differ by one 8-neighbor step. Holes are
//! not traced.
//!
//! [`get_longest_contour`] is the entry point used by the inspection
//! pipeline: binarize, trace, keep the contour with the most vertices.

mod trace;

pub use trace::{longest_outer_contour, trace_outer_contours};

use wi_core::{ImageView, Polygon};
use wi_morph::threshold_binary_u8;

/// Binarizes `raster` at `threshold_low` and returns the longest outer contour.
///
/// Returns `None` when no pixel exceeds the threshold.
pub fn get_longest_contour(
    raster: &ImageView<'_, u8>,
    threshold_low: u8,
    threshold_high: u8,
) -> Option<Polygon> {
    let mask = threshold_binary_u8(raster, threshold_low, threshold_high);
    longest_outer_contour(&mask.as_view())
}
