//! Rounding and min–max rescaling into the displayable sample range.

use crate::image::MAX_SAMPLE;

/// Round half away from zero, then clip to `[0, 255]`.
///
/// This is the only float-to-sample conversion in the crate; every transform
/// that works in floating point goes through it.
#[inline]
pub fn quantize(value: f64) -> u8 {
    value.round().clamp(0.0, f64::from(MAX_SAMPLE)) as u8
}

/// Linearly rescale `values` so the minimum maps to 0 and the maximum to 255.
///
/// A constant (or empty) input has no range to stretch and yields all zeros.
pub fn normalize_to_u8(values: &[f64]) -> Vec<u8> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if values.is_empty() || max <= min {
        return vec![0; values.len()];
    }

    // Divide before scaling: `255 / span` overflows for subnormal spans.
    let span = max - min;
    let full = f64::from(MAX_SAMPLE);
    values.iter().map(|&v| quantize((v - min) / span * full)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_half_away_from_zero() {
        assert_eq!(quantize(0.5), 1);
        assert_eq!(quantize(1.49), 1);
        assert_eq!(quantize(254.5), 255);
    }

    #[test]
    fn test_quantize_clips() {
        assert_eq!(quantize(-3.7), 0);
        assert_eq!(quantize(300.0), 255);
    }

    #[test]
    fn test_normalize_spans_full_range() {
        let out = normalize_to_u8(&[2.0, 3.0, 4.0]);
        assert_eq!(out, vec![0, 128, 255]);
    }

    #[test]
    fn test_normalize_subnormal_span() {
        let out = normalize_to_u8(&[0.0, 1e-310, 2e-310]);
        assert_eq!(out[0], 0);
        assert_eq!(out[2], 255);
        assert!((127..=128).contains(&out[1]), "midpoint = {}", out[1]);
    }

    #[test]
    fn test_normalize_constant_input_is_zero() {
        assert_eq!(normalize_to_u8(&[1.5, 1.5, 1.5]), vec![0, 0, 0]);
        assert!(normalize_to_u8(&[]).is_empty());
    }
}
