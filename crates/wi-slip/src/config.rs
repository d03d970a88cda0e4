use serde::{Deserialize, Serialize};
use wi_core::Rect;
use wi_edge::StepKernel2D;

/// Thresholds and margin strips for the slipped-edge scan.
///
/// Defaults match a 4096-pixel-wide de-interlaced field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipScanConfig {
    /// Minimum vertical run before the horizontal leg. Also the kernel half-height.
    pub vertical_run_min: usize,
    /// Minimum horizontal leg. Also the kernel half-width.
    pub horizontal_run_min: usize,
    /// Longer runs of diagonal steps reset all counters.
    pub chamfer_run_max: usize,
    /// Inclusive bounds on the polygon vertex count.
    pub polygon_length_min: usize,
    pub polygon_length_max: usize,
    /// The held response must be strictly above this in magnitude.
    pub gradient_abs_min: f32,
    pub left_strip: Rect,
    pub right_strip: Rect,
}

impl Default for SlipScanConfig {
    fn default() -> Self {
        Self {
            vertical_run_min: 7,
            horizontal_run_min: 4,
            chamfer_run_max: 5,
            polygon_length_min: 12_000,
            polygon_length_max: 19_000,
            gradient_abs_min: 4000.0,
            left_strip: Rect::new(0, 0, 400, 4096),
            right_strip: Rect::new(3695, 0, 401, 4096),
        }
    }
}

impl SlipScanConfig {
    /// Kernel of `(2 * vertical_run_min + 1) x (2 * horizontal_run_min + 1)` taps.
    pub fn step_kernel(&self) -> StepKernel2D {
        StepKernel2D::new(self.vertical_run_min, self.horizontal_run_min)
    }

    /// Whether a vertex in column `x` takes part in the scan.
    pub fn is_gated(&self, x: i32) -> bool {
        self.left_strip.contains_x(x) || self.right_strip.contains_x(x)
    }

    pub fn accepts_length(&self, vertex_count: usize) -> bool {
        (self.polygon_length_min..=self.polygon_length_max).contains(&vertex_count)
    }
}
