use wi_core::{BorderMode, Image, ImageView, map_index, to_f32};

use crate::StepKernel2D;
use crate::conv1d::{convolve_cols_f32, convolve_rows_f32};

/// Dense 2D convolution with a centered odd-sized kernel.
///
/// `out(x, y) = sum src(x + cx - kx, y + cy - ky) * kernel(kx, ky)`. This is
/// the reference the separable path is checked against.
pub fn convolve2d_f32(
    src: &ImageView<'_, f32>,
    kernel: &ImageView<'_, f32>,
    border: &BorderMode<f32>,
) -> Image<f32> {
    assert!(
        kernel.width() % 2 == 1 && kernel.height() % 2 == 1,
        "kernel dimensions must be odd"
    );

    let cx = (kernel.width() / 2) as isize;
    let cy = (kernel.height() / 2) as isize;

    Image::from_fn(src.width(), src.height(), |x, y| {
        let mut acc = 0.0f32;
        for ky in 0..kernel.height() {
            let sy = y as isize + cy - ky as isize;
            for (kx, &kv) in kernel.row(ky).iter().enumerate() {
                let sx = x as isize + cx - kx as isize;
                acc += fetch2d(src, sx, sy, border) * kv;
            }
        }
        acc
    })
}

/// Step-kernel response of an 8-bit raster, computed as a row pass with the
/// horizontal box followed by a column pass with the vertical sign profile.
///
/// The response is positive where intensity increases downward.
pub fn convolve_step_kernel(
    src: &ImageView<'_, u8>,
    kernel: &StepKernel2D,
    border: &BorderMode<f32>,
) -> Image<f32> {
    let src = to_f32(src);
    let rows = convolve_rows_f32(&src.as_view(), &kernel.horizontal, border);

    // Out-of-frame rows of the intermediate are whole rows of the constant.
    let column_border = match border {
        BorderMode::Constant(c) => BorderMode::Constant(c * kernel.horizontal.iter().sum::<f32>()),
        other => other.clone(),
    };

    convolve_cols_f32(&rows.as_view(), &kernel.vertical, &column_border)
}

#[inline]
fn fetch2d(src: &ImageView<'_, f32>, x: isize, y: isize, border: &BorderMode<f32>) -> f32 {
    if let BorderMode::Constant(c) = border {
        let inside = x >= 0 && y >= 0 && (x as usize) < src.width() && (y as usize) < src.height();
        if !inside {
            return *c;
        }
    }

    map_index(x, src.width(), border)
        .zip(map_index(y, src.height(), border))
        .and_then(|(xi, yi)| src.get(xi, yi).copied())
        .unwrap_or(0.0)
}
