//! Raster image representation shared by every transform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};
use crate::transform::lut::{self, Lut};

/// Largest representable sample value.
pub const MAX_SAMPLE: u8 = u8::MAX;

/// Number of interleaved planes in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channels {
    /// Single plane (grayscale).
    Gray,
    /// Three interleaved planes (color).
    Rgb,
}

impl Channels {
    /// Samples per pixel.
    pub const fn count(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray => write!(f, "grayscale"),
            Self::Rgb => write!(f, "RGB"),
        }
    }
}

impl TryFrom<u8> for Channels {
    type Error = TransformError;

    fn try_from(count: u8) -> Result<Self> {
        match count {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            other => Err(TransformError::InvalidImage(format!(
                "unsupported channel count {other}, expected 1 or 3"
            ))),
        }
    }
}

/// An 8-bit raster image with 1 or 3 interleaved channels.
///
/// Samples are stored row-major, pixel-interleaved: the sample for channel
/// `c` of pixel `(x, y)` lives at `(y * width + x) * channels + c`.
/// Every constructor validates the shape, so a `RasterImage` always holds
/// exactly `width × height × channels` samples with `width, height ≥ 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    channels: Channels,
    samples: Vec<u8>,
}

impl RasterImage {
    /// Build an image from an interleaved sample buffer.
    pub fn new(width: u32, height: u32, channels: Channels, samples: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height, channels)?;
        if samples.len() != expected {
            return Err(TransformError::InvalidImage(format!(
                "sample buffer holds {} values, expected {expected} ({width}x{height}x{})",
                samples.len(),
                channels.count()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Build an image from floating-point samples.
    ///
    /// Every value must be a finite integer in `[0, 255]`; fractional or
    /// out-of-range samples are rejected rather than rounded.
    pub fn from_f64_samples(
        width: u32,
        height: u32,
        channels: Channels,
        values: &[f64],
    ) -> Result<Self> {
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if v.is_finite() && v.fract() == 0.0 && (0.0..=f64::from(MAX_SAMPLE)).contains(&v) {
                    Ok(v as u8)
                } else {
                    Err(TransformError::InvalidImage(format!(
                        "sample {i} is {v}, expected an integer in [0, 255]"
                    )))
                }
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::new(width, height, channels, samples)
    }

    /// Build a color image from packed `[r, g, b]` pixels.
    pub fn from_rgb_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<Self> {
        let samples: &[u8] = bytemuck::cast_slice(pixels);
        Self::new(width, height, Channels::Rgb, samples.to_vec())
    }

    /// Same shape as `self`, new samples. Callers guarantee the length.
    pub(crate) fn with_samples(&self, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Interleaved sample buffer.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Total number of samples (`width × height × channels`).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false` for a validated image.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Sample at `(x, y)` in channel `c`, or `None` when out of bounds.
    pub fn sample(&self, x: u32, y: u32, c: usize) -> Option<u8> {
        if x >= self.width || y >= self.height || c >= self.channels.count() {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * self.channels.count() + c;
        self.samples.get(idx).copied()
    }

    /// Iterate over the samples of one channel in pixel order.
    ///
    /// Yields nothing when `c` is not a valid channel index.
    pub fn channel(&self, c: usize) -> impl Iterator<Item = u8> + '_ {
        let stride = self.channels.count();
        let count = if c < stride { self.pixel_count() } else { 0 };
        self.samples
            .iter()
            .skip(c)
            .step_by(stride)
            .take(count)
            .copied()
    }

    /// Map every sample through `lut`, producing a new image.
    pub fn map_samples(&self, lut: &Lut) -> Self {
        self.map_channels(std::slice::from_ref(lut))
    }

    /// Map each channel through its own table.
    ///
    /// `luts` holds either one table shared by all channels or exactly one
    /// table per channel.
    pub(crate) fn map_channels(&self, luts: &[Lut]) -> Self {
        debug_assert!(luts.len() == 1 || luts.len() == self.channels.count());
        let mut samples = self.samples.clone();
        let row_len = self.width as usize * self.channels.count();
        lut::apply_interleaved(&mut samples, luts, row_len);
        self.with_samples(samples)
    }

    /// Copy into an `image` crate buffer for display or encoding by the caller.
    pub fn to_dynamic_image(&self) -> Result<image::DynamicImage> {
        let samples = self.samples.clone();
        let converted = match self.channels {
            Channels::Gray => image::GrayImage::from_raw(self.width, self.height, samples)
                .map(image::DynamicImage::ImageLuma8),
            Channels::Rgb => image::RgbImage::from_raw(self.width, self.height, samples)
                .map(image::DynamicImage::ImageRgb8),
        };
        converted.ok_or_else(|| {
            TransformError::InvalidImage("sample buffer does not match image dimensions".into())
        })
    }
}

impl TryFrom<image::GrayImage> for RasterImage {
    type Error = TransformError;

    fn try_from(img: image::GrayImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, Channels::Gray, img.into_raw())
    }
}

impl TryFrom<image::RgbImage> for RasterImage {
    type Error = TransformError;

    fn try_from(img: image::RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, Channels::Rgb, img.into_raw())
    }
}

fn expected_len(width: u32, height: u32, channels: Channels) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidImage(format!(
            "image must be at least 1x1, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels.count()))
        .ok_or_else(|| TransformError::InvalidImage("image dimensions overflow".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_buffer_length() {
        let err = RasterImage::new(2, 2, Channels::Rgb, vec![0; 4]).unwrap_err();
        assert!(matches!(err, TransformError::InvalidImage(_)));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let err = RasterImage::new(0, 4, Channels::Gray, vec![]).unwrap_err();
        assert!(matches!(err, TransformError::InvalidImage(_)));
    }

    #[test]
    fn test_channel_count_conversion() {
        assert_eq!(Channels::try_from(1).unwrap(), Channels::Gray);
        assert_eq!(Channels::try_from(3).unwrap(), Channels::Rgb);
        assert!(Channels::try_from(4).is_err());
    }

    #[test]
    fn test_from_f64_rejects_fractional_and_out_of_range() {
        for bad in [0.5, -1.0, 256.0, f64::NAN] {
            let result = RasterImage::from_f64_samples(1, 1, Channels::Gray, &[bad]);
            assert!(result.is_err(), "{bad} should be rejected");
        }
        let img = RasterImage::from_f64_samples(2, 1, Channels::Gray, &[0.0, 255.0]).unwrap();
        assert_eq!(img.samples(), &[0, 255]);
    }

    #[test]
    fn test_sample_indexing_is_interleaved() {
        let img = RasterImage::from_rgb_pixels(2, 1, &[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(img.sample(1, 0, 0), Some(4));
        assert_eq!(img.sample(0, 0, 2), Some(3));
        assert_eq!(img.sample(2, 0, 0), None);
        assert_eq!(img.sample(0, 0, 3), None);
    }

    #[test]
    fn test_channel_iterator_extracts_one_plane() {
        let img = RasterImage::from_rgb_pixels(2, 1, &[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(img.channel(1).collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(img.channel(3).count(), 0);
    }

    #[test]
    fn test_map_samples_preserves_shape() {
        let img = RasterImage::new(3, 2, Channels::Gray, vec![0, 1, 2, 3, 4, 5]).unwrap();
        let out = img.map_samples(&Lut::from_fn(|v| v.saturating_mul(2)));
        assert_eq!(out.width(), 3);
        assert_eq!(out.height(), 2);
        assert_eq!(out.samples(), &[0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_image_crate_round_trip() {
        let gray = image::GrayImage::from_raw(2, 2, vec![10, 20, 30, 40]).unwrap();
        let img = RasterImage::try_from(gray).unwrap();
        assert_eq!(img.channels(), Channels::Gray);
        match img.to_dynamic_image().unwrap() {
            image::DynamicImage::ImageLuma8(buf) => assert_eq!(buf.into_raw(), vec![10, 20, 30, 40]),
            other => panic!("expected Luma8, got {:?}", other.color()),
        }
    }
}
