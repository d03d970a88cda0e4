//! Minimal single-HDU FITS codec for 2D images.
//!
//! Headers are 80-byte ASCII cards in 2880-byte blocks terminated by `END`;
//! data is big-endian and padded to a whole block. Physical values are
//! `BZERO + BSCALE * raw`.

use std::fs;
use std::path::Path;

use wi_core::{Image, ImageView};

use crate::Error;

const CARD_LEN: usize = 80;
const BLOCK_LEN: usize = 2880;

pub fn read_fits(path: &Path) -> Result<Image<f32>, Error> {
    let bytes = fs::read(path)?;
    decode_fits(&bytes)
}

/// Writes `img` as a `BITPIX = -32` image.
pub fn write_fits_f32(path: &Path, img: &ImageView<'_, f32>) -> Result<(), Error> {
    fs::write(path, encode_fits_f32(img))?;
    Ok(())
}

#[derive(Debug, Default)]
struct Header {
    bitpix: Option<i64>,
    width: Option<usize>,
    height: Option<usize>,
    bscale: f64,
    bzero: f64,
}

pub fn decode_fits(bytes: &[u8]) -> Result<Image<f32>, Error> {
    let mut header = Header {
        bscale: 1.0,
        ..Header::default()
    };
    let mut cards_read = 0usize;
    let mut ended = false;

    for card in bytes.chunks_exact(CARD_LEN) {
        cards_read += 1;
        let (keyword, value) = parse_card(card);

        match keyword.as_str() {
            "END" => {
                ended = true;
                break;
            }
            "NAXIS" => {
                let n = parse_int(&keyword, value)?;
                if n != 2 {
                    return Err(Error::FitsAxes(n));
                }
            }
            "BITPIX" => header.bitpix = Some(parse_int(&keyword, value)?),
            "NAXIS1" => header.width = Some(parse_dim(&keyword, value)?),
            "NAXIS2" => header.height = Some(parse_dim(&keyword, value)?),
            "BSCALE" => header.bscale = parse_float(&keyword, value)?,
            "BZERO" => header.bzero = parse_float(&keyword, value)?,
            _ => {}
        }
    }

    if !ended {
        return Err(Error::FitsHeader("missing END card".to_string()));
    }

    let bitpix = header
        .bitpix
        .ok_or_else(|| Error::FitsHeader("missing BITPIX".to_string()))?;
    let width = header
        .width
        .ok_or_else(|| Error::FitsHeader("missing NAXIS1".to_string()))?;
    let height = header
        .height
        .ok_or_else(|| Error::FitsHeader("missing NAXIS2".to_string()))?;

    let sample_len = match bitpix {
        8 => 1,
        16 => 2,
        -32 => 4,
        -64 => 8,
        other => return Err(Error::FitsBitPix(other)),
    };

    let data_start = (cards_read * CARD_LEN).div_ceil(BLOCK_LEN) * BLOCK_LEN;
    let data_len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(sample_len))
        .ok_or_else(|| Error::FitsHeader(format!("data size of {width}x{height} overflows")))?;
    let data = bytes
        .get(data_start..)
        .and_then(|rest| rest.get(..data_len))
        .ok_or(Error::FitsTruncated {
            expected: data_len,
            actual: bytes.len().saturating_sub(data_start),
        })?;

    let (bscale, bzero) = (header.bscale, header.bzero);
    let pixels = data
        .chunks_exact(sample_len)
        .map(|s| {
            let raw = match bitpix {
                8 => f64::from(s[0]),
                16 => f64::from(i16::from_be_bytes([s[0], s[1]])),
                -32 => f64::from(f32::from_be_bytes([s[0], s[1], s[2], s[3]])),
                _ => f64::from_be_bytes([s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7]]),
            };
            (bzero + bscale * raw) as f32
        })
        .collect();

    Ok(Image::from_vec(width, height, pixels)?)
}

pub fn encode_fits_f32(img: &ImageView<'_, f32>) -> Vec<u8> {
    let mut out = Vec::new();
    for card in [
        value_card("SIMPLE", "T", "file conforms to FITS standard"),
        value_card("BITPIX", "-32", "number of bits per data pixel"),
        value_card("NAXIS", "2", "number of data axes"),
        value_card("NAXIS1", &img.width().to_string(), "length of data axis 1"),
        value_card("NAXIS2", &img.height().to_string(), "length of data axis 2"),
        format!("{:<80}", "END"),
    ] {
        out.extend_from_slice(card.as_bytes());
    }
    out.resize(out.len().div_ceil(BLOCK_LEN) * BLOCK_LEN, b' ');

    for y in 0..img.height() {
        for &v in img.row(y) {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }
    out.resize(out.len().div_ceil(BLOCK_LEN) * BLOCK_LEN, 0);

    out
}

fn value_card(keyword: &str, value: &str, comment: &str) -> String {
    format!("{keyword:<8}= {value:>20} / {comment:<47}")
}

/// Keyword (columns 1-8) and the value field with any comment removed.
fn parse_card(card: &[u8]) -> (String, &str) {
    let text = core::str::from_utf8(card).unwrap_or("");
    let keyword = text.get(..8).unwrap_or(text).trim_end().to_string();

    let value = match text.get(8..10) {
        Some("= ") => text.get(10..).unwrap_or(""),
        _ => "",
    };
    let value = value.split('/').next().unwrap_or("").trim();

    (keyword, value)
}

fn parse_int(keyword: &str, value: &str) -> Result<i64, Error> {
    value
        .parse::<i64>()
        .map_err(|_| Error::FitsHeader(format!("{keyword} is not an integer: '{value}'")))
}

fn parse_dim(keyword: &str, value: &str) -> Result<usize, Error> {
    let n = parse_int(keyword, value)?;
    usize::try_from(n)
        .map_err(|_| Error::FitsHeader(format!("{keyword} must not be negative: {n}")))
}

fn parse_float(keyword: &str, value: &str) -> Result<f64, Error> {
    value
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map_err(|_| Error::FitsHeader(format!("{keyword} is not a number: '{value}'")))
}
