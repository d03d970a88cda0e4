//! Frame sources for wafer inspection.
//!
//! The line-scan camera writes headerless captures of interlaced 16-bit
//! little-endian samples. [`deinterlace_u16le`] splits such a capture into
//! its even and odd row fields as 8-bit rasters. FITS files (hand-rolled
//! codec) and PNG/TIFF files (through the `image` crate) are accepted too;
//! [`load_raster`] picks the decoder from the file extension.

mod error;
mod fits;
mod frame;
mod raster;

pub use error::Error;
pub use fits::{decode_fits, encode_fits_f32, read_fits, write_fits_f32};
pub use frame::{Fields, FrameConfig, FrameField, deinterlace_u16le};
pub use raster::{RasterFormat, load_raster, save_png_u8};
