//! Error taxonomy shared by every transform.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Why a transform or image construction was refused.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A scalar parameter violates the transform's precondition.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What the parameter should have been.
        reason: String,
    },
    /// Percentile bounds collapsed onto a single intensity.
    #[error("degenerate intensity range: both percentile bounds are {value}")]
    DegenerateRange {
        /// The intensity both bounds landed on.
        value: f64,
    },
    /// The input does not describe a valid raster image.
    #[error("invalid image: {0}")]
    InvalidImage(String),
    /// A parameter document could not be parsed.
    #[error("malformed transform parameters: {0}")]
    Params(#[from] serde_json::Error),
}

impl TransformError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(parameter = name, %reason, "rejected transform parameter");
        Self::InvalidParameter { name, reason }
    }
}

/// Reject NaN, infinities, zero, and negative values.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(TransformError::invalid_parameter(
            name,
            format!("must be finite, got {value}"),
        ));
    }
    if value <= 0.0 {
        return Err(TransformError::invalid_parameter(
            name,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive_accepts_small_values() {
        assert!(require_positive("gamma", 1e-9).is_ok());
    }

    #[test]
    fn test_require_positive_rejects_zero_and_nan() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = require_positive("gamma", value).unwrap_err();
            assert!(
                matches!(err, TransformError::InvalidParameter { name: "gamma", .. }),
                "{value} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = TransformError::invalid_parameter("plane", "must be at most 7, got 8");
        assert_eq!(
            err.to_string(),
            "invalid parameter `plane`: must be at most 7, got 8"
        );
    }
}
