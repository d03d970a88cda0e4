use serde::{Deserialize, Serialize};
use tracing::debug;
use wi_core::Polygon;
use wi_edge::StripResponses;

use crate::{EdgeVector, SlipScanConfig, derive_edge_vectors};

/// Outcome of scanning one polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectResult {
    NotFound,
    /// Index of the accepted vertex in the polygon.
    FoundAt(usize),
}

impl DefectResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::FoundAt(_))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NotFound => None,
            Self::FoundAt(i) => Some(*i),
        }
    }

    /// Integer encoding used by existing reports: `0` means "not found".
    ///
    /// `FoundAt(0)` would collide with the sentinel; the scan never evaluates
    /// vertex 0, so it is not produced in practice.
    pub fn legacy_index(&self) -> usize {
        self.index().unwrap_or(0)
    }

    pub fn from_legacy_index(index: usize) -> Self {
        if index == 0 {
            Self::NotFound
        } else {
            Self::FoundAt(index)
        }
    }
}

/// Run-length counters of the scan plus the last sampled response.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScanState {
    pub counter_horiz: usize,
    pub counter_vertical: usize,
    /// `counter_vertical` captured when the current horizontal run started.
    pub saved_vertical: usize,
    pub chamfer_counter: usize,
    /// Held across vertices that have no sample.
    pub convolution_value: f32,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds vertex `i` through the state machine and reports whether it is
    /// accepted as a defect.
    ///
    /// Vertices outside both strips leave the state untouched. `i == 0` and
    /// indices past the derived vectors are ignored.
    pub fn step(
        &mut self,
        i: usize,
        vectors: &[EdgeVector],
        polygon: &Polygon,
        strips: &StripResponses,
        cfg: &SlipScanConfig,
    ) -> bool {
        let Some(prev_index) = i.checked_sub(1) else {
            return false;
        };
        let (Some(cur), Some(prev), Some(p)) =
            (vectors.get(i), vectors.get(prev_index), polygon.point(i))
        else {
            return false;
        };

        if !cfg.is_gated(p.x) {
            return false;
        }

        if let Some(value) = strips.sample(p) {
            self.convolution_value = value;
        }

        if cur.is_chamfer() {
            self.chamfer_counter += 1;
        } else {
            self.chamfer_counter = 0;
        }
        if self.chamfer_counter > cfg.chamfer_run_max {
            self.counter_vertical = 0;
            self.counter_horiz = 0;
            self.saved_vertical = 0;
        }

        if cur.dx != prev.dx {
            self.counter_horiz = 0;
            self.saved_vertical = 0;
        }
        if cur.is_unit_horizontal() {
            if self.counter_horiz == 0 {
                self.saved_vertical = self.counter_vertical;
            }
            self.counter_horiz += 1;
        } else {
            self.counter_horiz = 0;
        }

        if cur.dy != prev.dy {
            self.counter_vertical = 0;
        }
        if cur.is_unit_vertical() {
            self.counter_vertical += 1;
        }

        self.saved_vertical >= cfg.vertical_run_min
            && self.counter_horiz >= cfg.horizontal_run_min
            && self.convolution_value.abs() > cfg.gradient_abs_min
    }
}

/// Scans `polygon` for a slipped edge and returns the first accepted vertex.
///
/// Vertices `1..=N-4` are evaluated; the last two derived vectors only feed
/// the derivation and are never accepted.
pub fn scan_polygon(
    polygon: &Polygon,
    strips: &StripResponses,
    cfg: &SlipScanConfig,
) -> DefectResult {
    let n = polygon.len();
    if !cfg.accepts_length(n) {
        debug!(
            vertices = n,
            min = cfg.polygon_length_min,
            max = cfg.polygon_length_max,
            "polygon length outside gate"
        );
        return DefectResult::NotFound;
    }

    let vectors = derive_edge_vectors(polygon);
    let mut state = ScanState::new();

    for i in 1..scan_end(&vectors) {
        if state.step(i, &vectors, polygon, strips, cfg) {
            debug!(
                index = i,
                x = polygon.points[i].x,
                y = polygon.points[i].y,
                saved_vertical = state.saved_vertical,
                counter_horiz = state.counter_horiz,
                response = state.convolution_value,
                "slipped edge candidate"
            );
            return DefectResult::FoundAt(i);
        }
    }

    DefectResult::NotFound
}

/// Exclusive upper bound of the evaluated vertex indices.
pub fn scan_end(vectors: &[EdgeVector]) -> usize {
    vectors.len().saturating_sub(2)
}
