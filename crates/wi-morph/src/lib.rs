//! Foreground masks for wafer frames.
//!
//! [`threshold_binary_u8`] turns a grayscale frame into a mask where the
//! wafer is `max_value` and the background is `0`. The 3x3 helpers treat any
//! pixel `> 0` as set and produce `0`/`255` masks; they are an optional
//! cleanup step before contour tracing.

use wi_core::{Image, ImageView};

/// Pixels strictly above `threshold` become `max_value`, all others `0`.
pub fn threshold_binary_u8(src: &ImageView<'_, u8>, threshold: u8, max_value: u8) -> Image<u8> {
    let mut data = Vec::with_capacity(src.width() * src.height());
    for y in 0..src.height() {
        data.extend(
            src.row(y)
                .iter()
                .map(|&v| if v > threshold { max_value } else { 0 }),
        );
    }

    Image::from_vec(src.width(), src.height(), data).expect("threshold output matches source size")
}

pub fn erode3x3_binary_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    // Pixels outside the frame count as unset, so the border always erodes.
    Image::from_fn(src.width(), src.height(), |x, y| {
        let all_set = neighborhood(src, x, y).all(|v| matches!(v, Some(v) if v != 0));
        if all_set { 255 } else { 0 }
    })
}

pub fn dilate3x3_binary_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    Image::from_fn(src.width(), src.height(), |x, y| {
        let any_set = neighborhood(src, x, y).any(|v| matches!(v, Some(v) if v != 0));
        if any_set { 255 } else { 0 }
    })
}

pub fn open3x3_binary_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    let eroded = erode3x3_binary_u8(src);
    dilate3x3_binary_u8(&eroded.as_view())
}

pub fn close3x3_binary_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    let dilated = dilate3x3_binary_u8(src);
    erode3x3_binary_u8(&dilated.as_view())
}

/// The 3x3 window around `(x, y)`; `None` marks positions outside the frame.
fn neighborhood<'a>(
    src: &'a ImageView<'_, u8>,
    x: usize,
    y: usize,
) -> impl Iterator<Item = Option<u8>> + 'a {
    (-1isize..=1).flat_map(move |dy| {
        (-1isize..=1).map(move |dx| {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 {
                return None;
            }
            src.get(nx as usize, ny as usize).copied()
        })
    })
}
