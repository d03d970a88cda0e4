use serde::{Deserialize, Serialize};
use wi_core::Image;

use crate::Error;

/// Which half of an interlaced frame is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameField {
    /// Rows 0, 2, 4, ...
    Even,
    /// Rows 1, 3, 5, ...
    #[default]
    Odd,
}

/// Geometry of a raw interlaced capture: `width x height` 16-bit
/// little-endian samples, no header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: usize,
    pub height: usize,
    pub field: FrameField,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 4096,
            height: 8192,
            field: FrameField::Odd,
        }
    }
}

/// Both fields of a de-interlaced frame, each `width x height / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    pub even: Image<u8>,
    pub odd: Image<u8>,
}

impl Fields {
    pub fn select(self, field: FrameField) -> Image<u8> {
        match field {
            FrameField::Even => self.even,
            FrameField::Odd => self.odd,
        }
    }
}

/// Splits a raw frame into its even and odd row fields.
///
/// Each output pixel keeps only the high byte of the sample, multiplied by 16
/// with 8-bit wraparound, so only the low nibble of the high byte survives.
/// A trailing odd row is dropped.
pub fn deinterlace_u16le(bytes: &[u8], width: usize, height: usize) -> Result<Fields, Error> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(2))
        .unwrap_or(usize::MAX);
    if bytes.len() != expected {
        return Err(Error::FrameSize {
            width,
            height,
            expected,
            actual: bytes.len(),
        });
    }

    let field_rows = height / 2;
    let row_bytes = width * 2;
    let mut even = Vec::with_capacity(width * field_rows);
    let mut odd = Vec::with_capacity(width * field_rows);

    for pair in bytes.chunks_exact(2 * row_bytes).take(field_rows) {
        let (first, second) = pair.split_at(row_bytes);
        even.extend(first.chunks_exact(2).map(|s| s[1].wrapping_mul(16)));
        odd.extend(second.chunks_exact(2).map(|s| s[1].wrapping_mul(16)));
    }

    Ok(Fields {
        even: Image::from_vec(width, field_rows, even)?,
        odd: Image::from_vec(width, field_rows, odd)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{FrameField, deinterlace_u16le};
    use crate::Error;

    fn frame_bytes(width: usize, height: usize, sample: impl Fn(usize, usize) -> u16) -> Vec<u8> {
        let mut out = Vec::with_capacity(width * height * 2);
        for y in 0..height {
            for x in 0..width {
                out.extend_from_slice(&sample(x, y).to_le_bytes());
            }
        }
        out
    }

    #[test]
    fn splits_rows_and_keeps_high_byte_times_sixteen() {
        let bytes = frame_bytes(3, 4, |x, y| ((y as u16) << 8) | (x as u16 * 40));
        let fields = deinterlace_u16le(&bytes, 3, 4).expect("valid frame");

        assert_eq!(fields.even.width(), 3);
        assert_eq!(fields.even.height(), 2);
        assert_eq!(fields.even.data(), &[0, 0, 0, 32, 32, 32]);
        assert_eq!(fields.odd.data(), &[16, 16, 16, 48, 48, 48]);
    }

    #[test]
    fn multiplication_wraps_in_eight_bits() {
        let bytes = frame_bytes(2, 2, |x, _| if x == 0 { 0x1f00 } else { 0x10ff });
        let odd = deinterlace_u16le(&bytes, 2, 2)
            .expect("valid frame")
            .select(FrameField::Odd);

        assert_eq!(odd.data(), &[0xf0, 0x00]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = deinterlace_u16le(&[0u8; 10], 3, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::FrameSize {
                expected: 12,
                actual: 10,
                ..
            }
        ));
    }

    #[test]
    fn trailing_row_of_odd_height_is_dropped() {
        let bytes = frame_bytes(2, 3, |_, y| (y as u16 + 1) << 8);
        let fields = deinterlace_u16le(&bytes, 2, 3).expect("valid frame");

        assert_eq!(fields.even.data(), &[16, 16]);
        assert_eq!(fields.odd.data(), &[32, 32]);
    }
}
