use std::fs;
use std::path::Path;

use image::GrayImage;
use tracing::debug;
use wi_core::Image;

use crate::{Error, FrameConfig, deinterlace_u16le, read_fits};

/// How a raster file is decoded, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// Headerless interlaced 16-bit capture (`.raw`, `.bin` or no extension).
    RawInterlaced,
    Fits,
    /// Anything the `image` crate decodes (PNG, TIFF).
    Encoded,
}

impl RasterFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            None | Some("raw") | Some("bin") => Self::RawInterlaced,
            Some("fits") | Some("fit") | Some("fts") => Self::Fits,
            Some(_) => Self::Encoded,
        }
    }
}

/// Loads a grayscale 8-bit raster.
///
/// Raw captures are de-interlaced and the configured field is returned.
/// FITS values are rounded and saturated to `0..=255`; encoded images are
/// converted to 8-bit luma.
pub fn load_raster(path: &Path, frame: &FrameConfig) -> Result<Image<u8>, Error> {
    let format = RasterFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading raster");

    match format {
        RasterFormat::RawInterlaced => {
            let bytes = fs::read(path)?;
            let fields = deinterlace_u16le(&bytes, frame.width, frame.height)?;
            Ok(fields.select(frame.field))
        }
        RasterFormat::Fits => {
            let img = read_fits(path)?;
            let data = img
                .data()
                .iter()
                .map(|&v| v.round().clamp(0.0, 255.0) as u8)
                .collect();
            Ok(Image::from_vec(img.width(), img.height(), data)?)
        }
        RasterFormat::Encoded => {
            let luma = image::open(path)?.to_luma8();
            let (w, h) = luma.dimensions();
            Ok(Image::from_vec(w as usize, h as usize, luma.into_raw())?)
        }
    }
}

pub fn save_png_u8(path: &Path, img: &Image<u8>) -> Result<(), Error> {
    let gray = GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
        .ok_or(Error::Raster(wi_core::Error::SizeMismatch {
            expected: img.width() * img.height(),
            actual: img.data().len(),
        }))?;
    gray.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use wi_core::Image;

    use super::{RasterFormat, load_raster, save_png_u8};
    use crate::{FrameConfig, FrameField, write_fits_f32};

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            RasterFormat::from_path(Path::new("a/wafer_001")),
            RasterFormat::RawInterlaced
        );
        assert_eq!(
            RasterFormat::from_path(Path::new("wafer.RAW")),
            RasterFormat::RawInterlaced
        );
        assert_eq!(RasterFormat::from_path(Path::new("w.fits")), RasterFormat::Fits);
        assert_eq!(RasterFormat::from_path(Path::new("w.Fit")), RasterFormat::Fits);
        assert_eq!(RasterFormat::from_path(Path::new("w.png")), RasterFormat::Encoded);
        assert_eq!(RasterFormat::from_path(Path::new("w.tiff")), RasterFormat::Encoded);
    }

    #[test]
    fn raw_capture_loads_selected_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("capture.raw");

        let (w, h) = (4usize, 6usize);
        let mut bytes = Vec::new();
        for y in 0..h {
            for _ in 0..w {
                bytes.extend_from_slice(&((y as u16 + 1) << 8).to_le_bytes());
            }
        }
        fs::write(&path, bytes).expect("write raw");

        let mut frame = FrameConfig {
            width: w,
            height: h,
            field: FrameField::Odd,
        };
        let odd = load_raster(&path, &frame).expect("odd field");
        assert_eq!((odd.width(), odd.height()), (4, 3));
        assert_eq!(odd.get(0, 0), Some(&32));
        assert_eq!(odd.get(3, 2), Some(&96));

        frame.field = FrameField::Even;
        let even = load_raster(&path, &frame).expect("even field");
        assert_eq!(even.get(0, 1), Some(&48));

        frame.height = 8;
        assert!(load_raster(&path, &frame).is_err());
    }

    #[test]
    fn png_written_then_loaded_is_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("mask.png");
        let img = Image::from_fn(9, 4, |x, y| (x * 20 + y) as u8);

        save_png_u8(&path, &img).expect("save png");
        let back = load_raster(&path, &FrameConfig::default()).expect("load png");
        assert_eq!(back, img);
    }

    #[test]
    fn fits_values_saturate_to_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("frame.fits");
        let img = Image::from_vec(4, 1, vec![-5.0f32, 12.4, 12.6, 300.0]).expect("valid image");

        write_fits_f32(&path, &img.as_view()).expect("write fits");
        let back = load_raster(&path, &FrameConfig::default()).expect("load fits");
        assert_eq!(back.data(), &[0, 12, 13, 255]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_raster(&dir.path().join("nope.raw"), &FrameConfig::default()).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
