//! Slipped-edge detection on wafer boundary polygons.
//!
//! A slipped (or chipped) wafer leaves a short notch in the outline near the
//! left or right margin: a run of unit vertical steps immediately followed by
//! a run of unit horizontal steps. Rounded corners, chamfers and boundary
//! jitter must not trigger it.
//!
//! The scan is a single forward pass:
//! 1. [`derive_edge_vectors`] turns the polygon into per-vertex steps.
//! 2. [`ScanState::step`] advances run-length counters one vertex at a time,
//!    only for vertices inside the margin strips of [`SlipScanConfig`].
//! 3. A vertex is accepted when the vertical run saved at the start of the
//!    current horizontal run and the horizontal run itself are long enough,
//!    and the held step-kernel response exceeds `gradient_abs_min`.
//!
//! At most one candidate is reported per polygon ([`DefectResult`]).

mod config;
mod scan;
mod vectors;

pub use config::SlipScanConfig;
pub use scan::{DefectResult, ScanState, scan_end, scan_polygon};
pub use vectors::{EdgeVector, derive_edge_vectors};
