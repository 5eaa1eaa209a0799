//! Histogram equalization.
//!
//! Each sample is remapped through the normalized cumulative distribution of
//! its channel:
//!
//! ```text
//! out = round((cdf(in) − cdf_min) / (N − cdf_min) × 255)
//! ```
//!
//! where `cdf_min` is the CDF at the darkest value present and `N` the
//! channel's sample count.
//!
//! Color images are equalized one channel at a time and recombined in the
//! original order. This is not luminance-preserving: channels with different
//! distributions receive different curves, which can shift hues.

use crate::image::RasterImage;
use crate::stats::histogram::Histogram;
use crate::stats::normalize::quantize;
use crate::transform::lut::Lut;

/// Equalize each channel of `image` independently.
pub fn equalize(image: &RasterImage) -> RasterImage {
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        "histogram equalization"
    );
    let luts: Vec<Lut> = (0..image.channels().count())
        .map(|c| equalization_lut(&Histogram::of_channel(image, c)))
        .collect();
    image.map_channels(&luts)
}

/// Build the equalization mapping for one channel's histogram.
///
/// The mapping is non-decreasing. An empty or single-valued histogram carries
/// no distribution to flatten and yields the identity.
pub fn equalization_lut(hist: &Histogram) -> Lut {
    let Some(darkest) = hist.min_value() else {
        return Lut::identity();
    };
    let cdf = hist.cumulative();
    let total = hist.total();
    let cdf_min = cdf[usize::from(darkest)];

    if total == cdf_min {
        tracing::trace!(value = darkest, "single-valued channel, equalization is identity");
        return Lut::identity();
    }
    tracing::trace!(cdf_min, total, "equalization cdf bounds");

    let scale = 255.0 / (total - cdf_min) as f64;
    Lut::from_fn(|v| {
        let above_min = cdf[usize::from(v)].saturating_sub(cdf_min);
        quantize(above_min as f64 * scale)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Channels;

    #[test]
    fn test_equalize_spreads_clustered_values() {
        let img = RasterImage::new(4, 1, Channels::Gray, vec![100, 101, 102, 103]).unwrap();
        let out = equalize(&img);
        assert_eq!(out.samples(), &[0, 85, 170, 255]);
    }

    #[test]
    fn test_equalize_preserves_order() {
        let samples = vec![5, 5, 5, 5, 60, 61, 200, 250];
        let img = RasterImage::new(8, 1, Channels::Gray, samples.clone()).unwrap();
        let out = equalize(&img);
        for (i, j) in (0..samples.len()).flat_map(|i| (0..samples.len()).map(move |j| (i, j))) {
            if samples[i] <= samples[j] {
                assert!(out.samples()[i] <= out.samples()[j]);
            }
        }
    }

    #[test]
    fn test_equalize_constant_image_is_unchanged() {
        let img = RasterImage::new(3, 1, Channels::Gray, vec![42, 42, 42]).unwrap();
        assert_eq!(equalize(&img), img);
    }

    #[test]
    fn test_equalize_color_channels_independent() {
        // Red spans two values, green is constant, blue spans two values.
        let img =
            RasterImage::from_rgb_pixels(2, 1, &[[10, 50, 200], [20, 50, 201]]).unwrap();
        let out = equalize(&img);
        assert_eq!(out.samples(), &[0, 50, 0, 255, 50, 255]);
    }

    #[test]
    fn test_equalization_lut_is_monotonic() {
        let hist = Histogram::of_samples(&[0, 3, 3, 9, 27, 81, 81, 81, 243]);
        let lut = equalization_lut(&hist);
        assert!(lut.is_monotonic());
        assert_eq!(lut.get(0), 0);
        assert_eq!(lut.get(243), 255);
    }
}
