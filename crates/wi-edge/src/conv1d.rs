use wi_core::{BorderMode, Image, ImageView, fetch};

/// True 1D convolution: `out[i] = sum_k signal[i + r - k] * kernel[k]` with
/// `r = kernel.len() / 2`.
pub fn convolve_f32(signal: &[f32], kernel: &[f32], border: &BorderMode<f32>, out: &mut [f32]) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert!(kernel.len() % 2 == 1, "kernel length must be odd");

    let n = signal.len();
    if n == 0 {
        return;
    }

    let radius = kernel.len() / 2;

    // Interior: full footprint in bounds, no border lookups.
    for (i, window) in signal.windows(kernel.len()).enumerate() {
        out[i + radius] = window
            .iter()
            .zip(kernel.iter().rev())
            .map(|(&s, &k)| s * k)
            .sum();
    }

    let left_end = radius.min(n);
    let right_start = n.saturating_sub(radius).max(left_end);
    for i in (0..left_end).chain(right_start..n) {
        out[i] = convolve_at(signal, kernel, radius, i, border);
    }
}

/// Convolves every row of `src` with `kernel`.
pub fn convolve_rows_f32(
    src: &ImageView<'_, f32>,
    kernel: &[f32],
    border: &BorderMode<f32>,
) -> Image<f32> {
    let w = src.width();
    let mut out = Image::new_fill(w, src.height(), 0.0f32);
    if w == 0 {
        return out;
    }

    for (y, dst) in out.data_mut().chunks_exact_mut(w).enumerate() {
        convolve_f32(src.row(y), kernel, border, dst);
    }

    out
}

/// Convolves every column of `src` with `kernel`.
pub fn convolve_cols_f32(
    src: &ImageView<'_, f32>,
    kernel: &[f32],
    border: &BorderMode<f32>,
) -> Image<f32> {
    let w = src.width();
    let h = src.height();
    let mut out = Image::new_fill(w, h, 0.0f32);
    if w == 0 || h == 0 {
        return out;
    }

    let mut column = vec![0.0f32; h];
    let mut column_out = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = src.row(y)[x];
        }

        convolve_f32(&column, kernel, border, &mut column_out);

        let data = out.data_mut();
        for (y, &v) in column_out.iter().enumerate() {
            data[y * w + x] = v;
        }
    }

    out
}

#[inline]
fn convolve_at(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    i: usize,
    border: &BorderMode<f32>,
) -> f32 {
    kernel
        .iter()
        .enumerate()
        .map(|(k, &kv)| {
            let idx = i as isize + radius as isize - k as isize;
            fetch(signal, idx, border).unwrap_or(0.0) * kv
        })
        .sum()
}
