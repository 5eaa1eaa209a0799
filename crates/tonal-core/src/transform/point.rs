//! Value-only transforms: negation, gamma correction, and logarithmic enhancement.

use crate::error::{Result, TransformError, require_positive};
use crate::image::{MAX_SAMPLE, RasterImage};
use crate::stats::histogram::Histogram;
use crate::stats::normalize::{normalize_to_u8, quantize};
use crate::transform::lut::Lut;

/// Invert every sample: `out = 255 − in`, per channel.
pub fn negate(image: &RasterImage) -> RasterImage {
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        "negate"
    );
    image.map_samples(&negation_lut())
}

/// Lookup table for [`negate`].
pub fn negation_lut() -> Lut {
    Lut::from_fn(|v| MAX_SAMPLE - v)
}

/// Apply a power-law curve to every sample.
///
/// ```text
/// out = round((in / 255)^gamma × 255)
/// ```
///
/// `gamma < 1` brightens, `gamma > 1` darkens, `gamma = 1` is the identity.
/// Fails with `InvalidParameter` unless `gamma` is finite and positive.
pub fn gamma_correct(image: &RasterImage, gamma: f64) -> Result<RasterImage> {
    require_positive("gamma", gamma)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        gamma,
        "gamma correction"
    );
    Ok(image.map_samples(&gamma_lut(gamma)))
}

/// Lookup table for [`gamma_correct`]. `gamma` must already be validated.
pub fn gamma_lut(gamma: f64) -> Lut {
    let max = f64::from(MAX_SAMPLE);
    Lut::from_fn(|v| quantize((f64::from(v) / max).powf(gamma) * max))
}

/// Logarithmic enhancement followed by min–max normalization.
///
/// ```text
/// v   = c × ln(1 + in)
/// out = round((v − min v) / (max v − min v) × 255)
/// ```
///
/// The minimum and maximum are taken over the whole image, all channels
/// pooled. Since `ln` is increasing they belong to the smallest and largest
/// samples present, so only that span of the table is computed. A constant
/// image has no range and maps to all zeros.
///
/// `c` scales `v` uniformly and cancels in the normalization, so the output
/// does not depend on it. It must still be finite and positive.
pub fn log_transform(image: &RasterImage, c: f64) -> Result<RasterImage> {
    validate_log_coefficient(c)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        c,
        "logarithmic transform"
    );

    let hist = Histogram::of_samples(image.samples());
    let (Some(lo), Some(hi)) = (hist.min_value(), hist.max_value()) else {
        return Err(TransformError::InvalidImage("image has no samples".into()));
    };

    if lo == hi {
        tracing::trace!(value = lo, "constant image, logarithmic output is all zero");
        return Ok(image.with_samples(vec![0; image.len()]));
    }

    tracing::trace!(min = lo, max = hi, "logarithmic normalization bounds");
    Ok(image.map_samples(&log_lut(lo, hi)))
}

/// Lookup table for [`log_transform`] over samples spanning `[lo, hi]`.
///
/// Built from `ln(1 + v)`; a positive coefficient cancels in the min–max
/// rescale. Values outside the span never occur in the source image and
/// map to 0.
pub fn log_lut(lo: u8, hi: u8) -> Lut {
    let scaled: Vec<f64> = (lo..=hi).map(|v| f64::from(v).ln_1p()).collect();
    let normalized = normalize_to_u8(&scaled);
    Lut::from_fn(|v| {
        if v < lo || v > hi {
            0
        } else {
            normalized[usize::from(v - lo)]
        }
    })
}

pub(crate) fn validate_log_coefficient(c: f64) -> Result<()> {
    require_positive("c", c)
}
