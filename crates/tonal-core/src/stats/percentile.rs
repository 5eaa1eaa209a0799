//! Percentiles computed from a histogram.
//!
//! Uses the "linear" convention: for `N` samples sorted ascending, the
//! `p`-th percentile sits at fractional rank
//!
//! ```text
//! r = p / 100 × (N − 1)
//! value = x[floor(r)] + (r − floor(r)) × (x[floor(r) + 1] − x[floor(r)])
//! ```
//!
//! Order statistics are read off the cumulative bin counts, so no sort is
//! needed.

use crate::error::{Result, TransformError};
use crate::stats::histogram::Histogram;

/// Interpolated `p`-th percentile (`0 ≤ p ≤ 100`) of the histogram's samples.
pub fn percentile(hist: &Histogram, p: f64) -> Result<f64> {
    if !p.is_finite() || !(0.0..=100.0).contains(&p) {
        return Err(TransformError::invalid_parameter(
            "percentile",
            format!("must lie in [0, 100], got {p}"),
        ));
    }
    let total = hist.total();
    if total == 0 {
        return Err(TransformError::InvalidImage(
            "cannot take a percentile of an empty sample set".into(),
        ));
    }

    let rank = p / 100.0 * (total - 1) as f64;
    let floor = rank.floor();
    let frac = rank - floor;
    let lower_rank = floor as u64;

    let lower = order_statistic(hist, lower_rank)?;
    if frac == 0.0 {
        return Ok(f64::from(lower));
    }
    let upper = order_statistic(hist, lower_rank + 1)?;
    Ok(f64::from(lower) + frac * (f64::from(upper) - f64::from(lower)))
}

/// Both bounds of a percentile interval, `(low, high)`.
pub fn percentile_range(hist: &Histogram, low: f64, high: f64) -> Result<(f64, f64)> {
    Ok((percentile(hist, low)?, percentile(hist, high)?))
}

fn order_statistic(hist: &Histogram, rank: u64) -> Result<u8> {
    hist.order_statistic(rank).ok_or_else(|| {
        TransformError::InvalidImage(format!(
            "rank {rank} out of range for {} samples",
            hist.total()
        ))
    })
}
