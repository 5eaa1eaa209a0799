//! Percentile-based contrast stretching.
//!
//! The intensity band between two percentiles of the sample distribution is
//! stretched linearly over the full output range:
//!
//! ```text
//! out = clip(round((in − p_lo) × 255 / (p_hi − p_lo)), 0, 255)
//! ```
//!
//! Samples below `p_lo` clip to 0 and samples above `p_hi` clip to 255. The
//! percentiles are computed once over all channels pooled.

use crate::error::{Result, TransformError};
use crate::image::{MAX_SAMPLE, RasterImage};
use crate::stats::histogram::Histogram;
use crate::stats::normalize::quantize;
use crate::stats::percentile::percentile_range;
use crate::transform::lut::Lut;

/// Stretch `[p(low_percentile), p(high_percentile)]` onto `[0, 255]`.
///
/// Requires `0 ≤ low_percentile < high_percentile ≤ 100`. Fails with
/// `DegenerateRange` when both percentiles land on the same intensity.
pub fn stretch(
    image: &RasterImage,
    low_percentile: f64,
    high_percentile: f64,
) -> Result<RasterImage> {
    validate_percentiles(low_percentile, high_percentile)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        low_percentile,
        high_percentile,
        "contrast stretch"
    );

    let hist = Histogram::of_samples(image.samples());
    let (p_lo, p_hi) = percentile_range(&hist, low_percentile, high_percentile)?;
    tracing::trace!(p_lo, p_hi, "contrast stretch bounds");

    Ok(image.map_samples(&stretch_lut(p_lo, p_hi)?))
}

/// Lookup table mapping `[p_lo, p_hi]` linearly onto `[0, 255]`.
pub fn stretch_lut(p_lo: f64, p_hi: f64) -> Result<Lut> {
    let span = p_hi - p_lo;
    if span <= 0.0 {
        return Err(TransformError::DegenerateRange { value: p_lo });
    }
    let scale = f64::from(MAX_SAMPLE) / span;
    Ok(Lut::from_fn(|v| quantize((f64::from(v) - p_lo) * scale)))
}

pub(crate) fn validate_percentiles(low: f64, high: f64) -> Result<()> {
    for (name, value) in [("low_percentile", low), ("high_percentile", high)] {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(TransformError::invalid_parameter(
                name,
                format!("must lie in [0, 100], got {value}"),
            ));
        }
    }
    if low >= high {
        return Err(TransformError::invalid_parameter(
            "low_percentile",
            format!("must be below high_percentile ({low} >= {high})"),
        ));
    }
    Ok(())
}
