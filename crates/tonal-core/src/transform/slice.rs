//! Binary masks: intensity-band slicing and bit-plane extraction.
//!
//! Both transforms keep the input's shape and channel count; each output
//! sample is either 0 or 255.

use crate::error::{Result, TransformError};
use crate::image::{MAX_SAMPLE, RasterImage};
use crate::transform::lut::Lut;

/// Highest bit index of an 8-bit sample.
pub const MAX_BIT_PLANE: u8 = 7;

/// Mask samples inside the inclusive band `[low, high]`.
///
/// Output is 255 where `low ≤ in ≤ high`, else 0. Requires `low ≤ high`.
pub fn slice_intensity(image: &RasterImage, low: u8, high: u8) -> Result<RasterImage> {
    validate_band(low, high)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        low,
        high,
        "intensity slicing"
    );
    Ok(image.map_samples(&band_lut(low, high)))
}

/// Lookup table for [`slice_intensity`].
pub fn band_lut(low: u8, high: u8) -> Lut {
    Lut::from_fn(|v| mask((low..=high).contains(&v)))
}

/// Extract one bit plane: 255 where bit `plane` of the sample is set, else 0.
///
/// `plane` 0 is the least significant bit. Requires `plane ≤ 7`.
pub fn bit_plane(image: &RasterImage, plane: u8) -> Result<RasterImage> {
    validate_plane(plane)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        plane,
        "bit-plane slicing"
    );
    Ok(image.map_samples(&bit_plane_lut(plane)))
}

/// Lookup table for [`bit_plane`]. `plane` must already be validated.
pub fn bit_plane_lut(plane: u8) -> Lut {
    Lut::from_fn(|v| mask((v >> plane) & 1 == 1))
}

pub(crate) fn validate_band(low: u8, high: u8) -> Result<()> {
    if low > high {
        return Err(TransformError::invalid_parameter(
            "low",
            format!("must not exceed high ({low} > {high})"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_plane(plane: u8) -> Result<()> {
    if plane > MAX_BIT_PLANE {
        return Err(TransformError::invalid_parameter(
            "plane",
            format!("must be at most {MAX_BIT_PLANE}, got {plane}"),
        ));
    }
    Ok(())
}

#[inline]
fn mask(on: bool) -> u8 {
    if on { MAX_SAMPLE } else { 0 }
}
