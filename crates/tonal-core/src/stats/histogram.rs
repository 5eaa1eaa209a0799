//! 256-bin sample histograms.

use crate::image::RasterImage;
use crate::transform::lut::LUT_SIZE;

/// Bin counts for every 8-bit sample value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; LUT_SIZE],
    total: u64,
}

impl Histogram {
    /// Histogram over a flat sample slice (all channels pooled).
    pub fn of_samples(samples: &[u8]) -> Self {
        samples.iter().copied().collect()
    }

    /// Histogram over a single channel of `image`.
    pub fn of_channel(image: &RasterImage, channel: usize) -> Self {
        image.channel(channel).collect()
    }

    pub fn bins(&self) -> &[u64; LUT_SIZE] {
        &self.bins
    }

    /// Number of samples counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Running sum of the bin counts; `cumulative()[v]` counts samples `<= v`.
    pub fn cumulative(&self) -> [u64; LUT_SIZE] {
        let mut cdf = [0u64; LUT_SIZE];
        let mut running = 0u64;
        for (slot, &count) in cdf.iter_mut().zip(self.bins.iter()) {
            running += count;
            *slot = running;
        }
        cdf
    }

    /// Smallest value with a non-zero count.
    pub fn min_value(&self) -> Option<u8> {
        self.bins.iter().position(|&n| n > 0).map(|v| v as u8)
    }

    /// Largest value with a non-zero count.
    pub fn max_value(&self) -> Option<u8> {
        self.bins.iter().rposition(|&n| n > 0).map(|v| v as u8)
    }

    /// The `rank`-th smallest sample (0-based), or `None` if `rank >= total`.
    ///
    /// Walks the bins instead of sorting, so the cost is bounded by the
    /// number of bins.
    pub fn order_statistic(&self, rank: u64) -> Option<u8> {
        let mut seen = 0u64;
        for (value, &count) in self.bins.iter().enumerate() {
            seen += count;
            if seen > rank {
                return Some(value as u8);
            }
        }
        None
    }
}

impl FromIterator<u8> for Histogram {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut bins = [0u64; LUT_SIZE];
        let mut total = 0u64;
        for sample in iter {
            bins[sample as usize] += 1;
            total += 1;
        }
        Self { bins, total }
    }
}
