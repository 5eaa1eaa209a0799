//! Sample statistics — histograms, order statistics, and range normalization.

pub mod histogram;
pub mod normalize;
pub mod percentile;

pub use histogram::Histogram;
pub use normalize::{normalize_to_u8, quantize};
pub use percentile::{percentile, percentile_range};
