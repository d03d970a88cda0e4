use core::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Image(image::ImageError),
    Raster(wi_core::Error),
    FrameSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    FitsHeader(String),
    FitsBitPix(i64),
    FitsAxes(i64),
    FitsTruncated {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Image(e) => write!(f, "image codec error: {e}"),
            Self::Raster(e) => write!(f, "raster error: {e}"),
            Self::FrameSize {
                width,
                height,
                expected,
                actual,
            } => write!(
                f,
                "raw frame {width}x{height} needs {expected} bytes, got {actual}"
            ),
            Self::FitsHeader(msg) => write!(f, "invalid FITS header: {msg}"),
            Self::FitsBitPix(b) => write!(f, "unsupported FITS BITPIX {b}"),
            Self::FitsAxes(n) => write!(f, "only 2D FITS images are supported, NAXIS = {n}"),
            Self::FitsTruncated { expected, actual } => {
                write!(f, "FITS data truncated: expected {expected} bytes, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Image(e) => Some(e),
            Self::Raster(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<wi_core::Error> for Error {
    fn from(e: wi_core::Error) -> Self {
        Self::Raster(e)
    }
}
