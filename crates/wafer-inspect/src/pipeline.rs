use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use wi_contour::longest_outer_contour;
use wi_core::{Image, ImageView, Point2i, Polygon};
use wi_edge::StripResponses;
use wi_io::load_raster;
use wi_morph::{close3x3_binary_u8, open3x3_binary_u8, threshold_binary_u8};
use wi_slip::{DefectResult, scan_polygon};

use crate::InspectConfig;

/// Result for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub result: DefectResult,
    /// Vertices of the longest contour, `0` if the mask was empty.
    pub vertex_count: usize,
    /// Contour vertex at the reported index.
    pub location: Option<Point2i>,
}

impl Inspection {
    /// Report coordinates; `(0, 0)` when nothing was found.
    pub fn report_xy(&self) -> (i32, i32) {
        self.location.map_or((0, 0), |p| (p.x, p.y))
    }
}

/// Intermediate products of one inspection, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub inspection: Inspection,
    pub mask: Image<u8>,
    pub contour: Option<Polygon>,
    pub strips: StripResponses,
}

pub fn analyze_raster(raster: &ImageView<'_, u8>, cfg: &InspectConfig) -> Result<Analysis> {
    let mut mask = threshold_binary_u8(raster, cfg.threshold_low, cfg.threshold_high);
    if cfg.mask_cleanup {
        let opened = open3x3_binary_u8(&mask.as_view());
        mask = close3x3_binary_u8(&opened.as_view());
    }

    let contour = longest_outer_contour(&mask.as_view());
    let strips = StripResponses::compute(
        raster,
        cfg.scan.left_strip,
        cfg.scan.right_strip,
        &cfg.scan.step_kernel(),
        &cfg.border,
    )
    .context("convolving margin strips")?;

    let (result, vertex_count) = match &contour {
        Some(polygon) => (scan_polygon(polygon, &strips, &cfg.scan), polygon.len()),
        None => {
            debug!("mask has no foreground");
            (DefectResult::NotFound, 0)
        }
    };
    let location = result
        .index()
        .and_then(|i| contour.as_ref().and_then(|p| p.point(i)));

    Ok(Analysis {
        inspection: Inspection {
            result,
            vertex_count,
            location,
        },
        mask,
        contour,
        strips,
    })
}

pub fn inspect_raster(raster: &ImageView<'_, u8>, cfg: &InspectConfig) -> Result<Inspection> {
    analyze_raster(raster, cfg).map(|a| a.inspection)
}

/// Loads `path` and inspects it, optionally writing diagnostics to `dump_dir`.
pub fn inspect_file(
    path: &Path,
    cfg: &InspectConfig,
    dump_dir: Option<&Path>,
) -> Result<Inspection> {
    let raster =
        load_raster(path, &cfg.frame).with_context(|| format!("loading {}", path.display()))?;
    let analysis = analyze_raster(&raster.as_view(), cfg)
        .with_context(|| format!("inspecting {}", path.display()))?;

    if let Some(dir) = dump_dir {
        crate::write_diagnostics(dir, path, &raster, &analysis)?;
    }

    let inspection = analysis.inspection;
    match inspection.location {
        Some(p) => info!(
            file = %path.display(),
            vertices = inspection.vertex_count,
            x = p.x,
            y = p.y,
            "slipped edge found"
        ),
        None => info!(
            file = %path.display(),
            vertices = inspection.vertex_count,
            "no slipped edge"
        ),
    }

    Ok(inspection)
}
