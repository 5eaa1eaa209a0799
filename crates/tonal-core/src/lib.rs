//! Tonal Core — pointwise and histogram-based intensity transforms.
//!
//! Seven independent, pure transforms over 8-bit grayscale or RGB rasters:
//! negation, gamma correction, logarithmic enhancement, percentile contrast
//! stretching, histogram equalization, intensity-band slicing, and bit-plane
//! extraction. Each takes a borrowed [`RasterImage`] plus scalar parameters
//! and returns a new image; inputs are never modified.
//!
//! Every transform is baked into a 256-entry [`Lut`] (using histogram
//! statistics where needed) and applied in one pass, so cost is linear in
//! image size. No decoding, encoding, or I/O happens here.

pub mod error;
pub mod image;
pub mod stats;
pub mod transform;

// Re-exports for convenience.
pub use error::{Result, TransformError};
pub use crate::image::{Channels, RasterImage};
pub use stats::Histogram;
pub use transform::contrast::stretch;
pub use transform::equalize::equalize;
pub use transform::lut::Lut;
pub use transform::params::{ParamRange, TransformKind, TransformParams};
pub use transform::point::{gamma_correct, log_transform, negate};
pub use transform::slice::{bit_plane, slice_intensity};
