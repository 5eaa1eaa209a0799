//! Serializable transform selection and parameters.
//!
//! `TransformParams` is the contract between a front end and the library:
//! the front end picks a method, fills in its scalar parameters (clamped to
//! the `ParamRange` of each widget), and hands the value over for validation
//! and application.

use serde::{Deserialize, Serialize};

use crate::error::{Result, require_positive};
use crate::image::RasterImage;
use crate::transform::{contrast, equalize, point, slice};

/// Default gamma exponent (identity).
pub const DEFAULT_GAMMA: f64 = 1.0;
/// Default logarithmic coefficient.
pub const DEFAULT_LOG_COEFFICIENT: f64 = 1.0;
/// Default lower percentile for contrast stretching.
pub const DEFAULT_LOW_PERCENTILE: f64 = 2.0;
/// Default upper percentile for contrast stretching.
pub const DEFAULT_HIGH_PERCENTILE: f64 = 98.0;
/// Default lower bound of the sliced intensity band.
pub const DEFAULT_SLICE_LOW: u8 = 100;
/// Default upper bound of the sliced intensity band.
pub const DEFAULT_SLICE_HIGH: u8 = 200;
/// Default bit plane (least significant).
pub const DEFAULT_BIT_PLANE: u8 = 0;

/// Bounds and step of a front-end parameter widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    /// Smallest value the widget offers.
    pub min: f64,
    /// Largest value the widget offers.
    pub max: f64,
    /// Increment between adjacent widget positions.
    pub step: f64,
}

impl ParamRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp a widget value into range. NaN clamps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// Gamma slider.
pub const GAMMA_RANGE: ParamRange = ParamRange {
    min: 0.1,
    max: 5.0,
    step: 0.01,
};
/// Percentile slider for contrast stretching.
pub const PERCENTILE_RANGE: ParamRange = ParamRange {
    min: 0.0,
    max: 100.0,
    step: 1.0,
};
/// Intensity inputs for band slicing.
pub const INTENSITY_RANGE: ParamRange = ParamRange {
    min: 0.0,
    max: 255.0,
    step: 1.0,
};
/// Bit-plane slider.
pub const BIT_PLANE_RANGE: ParamRange = ParamRange {
    min: 0.0,
    max: slice::MAX_BIT_PLANE as f64,
    step: 1.0,
};

/// Identifies one of the seven transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Intensity inversion.
    Negative,
    /// Power-law curve.
    GammaCorrection,
    /// Logarithmic enhancement with min–max normalization.
    Logarithmic,
    /// Percentile-based contrast stretching.
    ContrastStretching,
    /// Per-channel histogram equalization.
    HistogramEqualization,
    /// Binary mask of an intensity band.
    IntensitySlicing,
    /// Binary mask of one bit plane.
    BitPlaneSlicing,
}

impl TransformKind {
    /// Human-readable label for menus.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Negative => "Image Negative",
            Self::GammaCorrection => "Gamma Correction",
            Self::Logarithmic => "Logarithmic Transformation",
            Self::ContrastStretching => "Contrast Stretching",
            Self::HistogramEqualization => "Histogram Equalization",
            Self::IntensitySlicing => "Intensity Level Slicing",
            Self::BitPlaneSlicing => "Bit Plane Slicing",
        }
    }

    /// One-paragraph explanation shown next to the method selector.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Negative => {
                "Inverts every sample by subtracting it from the maximum intensity, \
                 turning light areas dark and dark areas light. Useful for revealing \
                 detail in bright regions."
            }
            Self::GammaCorrection => {
                "Applies a power-law curve to the normalized intensities. Gamma below 1 \
                 brightens the image, gamma above 1 darkens it, and 1 leaves it unchanged."
            }
            Self::Logarithmic => {
                "Maps intensities through a logarithm, expanding dark values and \
                 compressing bright ones, then rescales the result to the full range. \
                 Brings out detail in underexposed regions."
            }
            Self::ContrastStretching => {
                "Stretches the intensity band between two percentiles of the image's \
                 distribution over the full output range. Samples outside the band are \
                 clipped to black or white."
            }
            Self::HistogramEqualization => {
                "Remaps intensities through the cumulative histogram so frequently used \
                 values spread across the whole range, raising global contrast. Color \
                 images are equalized one channel at a time."
            }
            Self::IntensitySlicing => {
                "Highlights samples inside an intensity band and blanks everything else, \
                 producing a binary mask of the band."
            }
            Self::BitPlaneSlicing => {
                "Shows a single bit of every sample as a binary image, revealing how much \
                 each bit contributes to the overall appearance."
            }
        }
    }

    /// Every transform, in menu order.
    pub fn all() -> &'static [Self] {
        const ALL: [TransformKind; 7] = [
            TransformKind::Negative,
            TransformKind::GammaCorrection,
            TransformKind::Logarithmic,
            TransformKind::ContrastStretching,
            TransformKind::HistogramEqualization,
            TransformKind::IntensitySlicing,
            TransformKind::BitPlaneSlicing,
        ];
        &ALL
    }
}

/// A selected transform together with its scalar parameters.
///
/// Serialized with a `method` tag, e.g.
/// `{"method": "contrast_stretching", "low_percentile": 2, "high_percentile": 98}`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum TransformParams {
    /// See [`point::negate`].
    #[default]
    Negative,
    /// See [`point::gamma_correct`].
    GammaCorrection {
        /// Exponent applied to normalized samples. Must be positive.
        #[serde(default = "default_gamma")]
        gamma: f64,
    },
    /// See [`point::log_transform`].
    Logarithmic {
        /// Logarithm coefficient. Must be positive.
        #[serde(default = "default_log_coefficient")]
        c: f64,
    },
    /// See [`contrast::stretch`].
    ContrastStretching {
        /// Percentile mapped to 0.
        #[serde(default = "default_low_percentile")]
        low_percentile: f64,
        /// Percentile mapped to 255.
        #[serde(default = "default_high_percentile")]
        high_percentile: f64,
    },
    /// See [`equalize::equalize`].
    HistogramEqualization,
    /// See [`slice::slice_intensity`].
    IntensitySlicing {
        /// Inclusive lower bound of the band.
        #[serde(default = "default_slice_low")]
        low: u8,
        /// Inclusive upper bound of the band.
        #[serde(default = "default_slice_high")]
        high: u8,
    },
    /// See [`slice::bit_plane`].
    BitPlaneSlicing {
        /// Bit index, 0 = least significant.
        #[serde(default)]
        plane: u8,
    },
}

impl TransformParams {
    /// Parameters a front end starts from when `kind` is selected.
    pub const fn default_for(kind: TransformKind) -> Self {
        match kind {
            TransformKind::Negative => Self::Negative,
            TransformKind::GammaCorrection => Self::GammaCorrection {
                gamma: DEFAULT_GAMMA,
            },
            TransformKind::Logarithmic => Self::Logarithmic {
                c: DEFAULT_LOG_COEFFICIENT,
            },
            TransformKind::ContrastStretching => Self::ContrastStretching {
                low_percentile: DEFAULT_LOW_PERCENTILE,
                high_percentile: DEFAULT_HIGH_PERCENTILE,
            },
            TransformKind::HistogramEqualization => Self::HistogramEqualization,
            TransformKind::IntensitySlicing => Self::IntensitySlicing {
                low: DEFAULT_SLICE_LOW,
                high: DEFAULT_SLICE_HIGH,
            },
            TransformKind::BitPlaneSlicing => Self::BitPlaneSlicing {
                plane: DEFAULT_BIT_PLANE,
            },
        }
    }

    pub const fn kind(&self) -> TransformKind {
        match self {
            Self::Negative => TransformKind::Negative,
            Self::GammaCorrection { .. } => TransformKind::GammaCorrection,
            Self::Logarithmic { .. } => TransformKind::Logarithmic,
            Self::ContrastStretching { .. } => TransformKind::ContrastStretching,
            Self::HistogramEqualization => TransformKind::HistogramEqualization,
            Self::IntensitySlicing { .. } => TransformKind::IntensitySlicing,
            Self::BitPlaneSlicing { .. } => TransformKind::BitPlaneSlicing,
        }
    }

    /// Check the parameters against the transform's precondition.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Negative | Self::HistogramEqualization => Ok(()),
            Self::GammaCorrection { gamma } => require_positive("gamma", gamma),
            Self::Logarithmic { c } => point::validate_log_coefficient(c),
            Self::ContrastStretching {
                low_percentile,
                high_percentile,
            } => contrast::validate_percentiles(low_percentile, high_percentile),
            Self::IntensitySlicing { low, high } => slice::validate_band(low, high),
            Self::BitPlaneSlicing { plane } => slice::validate_plane(plane),
        }
    }

    /// Run the selected transform on `image`.
    pub fn apply(&self, image: &RasterImage) -> Result<RasterImage> {
        match *self {
            Self::Negative => Ok(point::negate(image)),
            Self::GammaCorrection { gamma } => point::gamma_correct(image, gamma),
            Self::Logarithmic { c } => point::log_transform(image, c),
            Self::ContrastStretching {
                low_percentile,
                high_percentile,
            } => contrast::stretch(image, low_percentile, high_percentile),
            Self::HistogramEqualization => Ok(equalize::equalize(image)),
            Self::IntensitySlicing { low, high } => slice::slice_intensity(image, low, high),
            Self::BitPlaneSlicing { plane } => slice::bit_plane(image, plane),
        }
    }

    /// Parse and validate a JSON parameter document.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn default_gamma() -> f64 {
    DEFAULT_GAMMA
}

fn default_log_coefficient() -> f64 {
    DEFAULT_LOG_COEFFICIENT
}

fn default_low_percentile() -> f64 {
    DEFAULT_LOW_PERCENTILE
}

fn default_high_percentile() -> f64 {
    DEFAULT_HIGH_PERCENTILE
}

fn default_slice_low() -> u8 {
    DEFAULT_SLICE_LOW
}

fn default_slice_high() -> u8 {
    DEFAULT_SLICE_HIGH
}
