use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use wi_core::{Image, Point2i};
use wi_io::{save_png_u8, write_fits_f32};

use crate::Analysis;

const CONTOUR_GRAY: u8 = 192;
const DEFECT_GRAY: u8 = 255;

/// Writes `<stem>_mask.png`, `<stem>_left.fits`, `<stem>_right.fits` and
/// `<stem>_overlay.png` into `dir`.
///
/// The overlay is the input raster with the contour drawn in gray and the
/// reported vertex as a white dot.
pub fn write_diagnostics(
    dir: &Path,
    source: &Path,
    raster: &Image<u8>,
    analysis: &Analysis,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating dump directory {}", dir.display()))?;

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let out = |suffix: &str| -> PathBuf { dir.join(format!("{stem}_{suffix}")) };

    let mask_path = out("mask.png");
    save_png_u8(&mask_path, &analysis.mask)
        .with_context(|| format!("saving {}", mask_path.display()))?;

    for (suffix, map) in [
        ("left.fits", &analysis.strips.left),
        ("right.fits", &analysis.strips.right),
    ] {
        let path = out(suffix);
        write_fits_f32(&path, &map.as_view())
            .with_context(|| format!("saving {}", path.display()))?;
    }

    let overlay_path = out("overlay.png");
    render_overlay(raster, analysis)?
        .save(&overlay_path)
        .with_context(|| format!("saving {}", overlay_path.display()))?;

    Ok(())
}

fn render_overlay(raster: &Image<u8>, analysis: &Analysis) -> Result<GrayImage> {
    let mut vis = GrayImage::from_raw(
        raster.width() as u32,
        raster.height() as u32,
        raster.data().to_vec(),
    )
    .context("constructing overlay image from raster")?;

    if let Some(contour) = &analysis.contour {
        for &p in contour.as_slice() {
            draw_dot(&mut vis, p, 1, CONTOUR_GRAY);
        }
    }
    if let Some(p) = analysis.inspection.location {
        draw_dot(&mut vis, p, 4, DEFECT_GRAY);
    }

    Ok(vis)
}

fn draw_dot(img: &mut GrayImage, center: Point2i, radius: i32, value: u8) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let x = center.x + dx;
            let y = center.y + dy;
            if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
                continue;
            }
            img.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }
}
