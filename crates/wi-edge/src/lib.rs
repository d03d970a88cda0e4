//! Step-edge responses along the wafer margins.
//!
//! A slipped edge shows up as a short horizontal notch near the left or right
//! margin. [`StepKernel2D`] responds to horizontal intensity steps; it is
//! evaluated only over two fixed strips of the frame ([`StripResponses`]).
//!
//! All convolutions are true convolutions with centered kernels and an
//! explicit [`wi_core::BorderMode`]. The separable path
//! ([`convolve_step_kernel`]) is what the pipeline uses; [`convolve2d_f32`]
//! is the dense reference.

pub mod conv1d;
mod conv2d;
mod kernel;
mod strips;

pub use conv2d::{convolve_step_kernel, convolve2d_f32};
pub use kernel::StepKernel2D;
pub use strips::StripResponses;
