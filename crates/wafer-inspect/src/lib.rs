//! Slipped-wafer inspection: from capture files to a per-image report.
//!
//! Per image: load and de-interlace the capture ([`wi_io`]), binarize and
//! take the longest outer contour ([`wi_morph`], [`wi_contour`]), convolve
//! the margin strips with the step kernel ([`wi_edge`]) and scan the contour
//! ([`wi_slip`]). Batches run image-parallel with the `rayon` feature; the
//! report keeps input order.

mod batch;
mod config;
mod dump;
mod pipeline;
mod report;

pub use batch::{ImageOutcome, list_input_files, run_batch};
pub use config::{InspectConfig, load_config, write_config};
pub use dump::write_diagnostics;
pub use pipeline::{Analysis, Inspection, analyze_raster, inspect_file, inspect_raster};
pub use report::{REPORT_HEADER, Summary, format_row, write_report};

pub use wi_core::{BorderMode, Image, ImageView, Point2i, Polygon, Rect};
pub use wi_io::{FrameConfig, FrameField};
pub use wi_slip::{DefectResult, SlipScanConfig};
