//! Error types for vitrine-core.

use thiserror::Error;

/// Reasons a chart refuses to draw.
///
/// A chart that returns one of these has painted nothing, not even the clear.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Dataset has no points.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Line chart maximum is zero or negative, so values cannot be normalized.
    #[error("dataset maximum must be positive, got {0}")]
    NonPositiveMaximum(f64),

    /// Doughnut values sum to zero.
    #[error("dataset total must be positive")]
    ZeroTotal,

    /// Doughnut slices cannot have negative share.
    #[error("value at index {index} is negative ({value})")]
    NegativeValue {
        /// Offending index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Radar values must already be normalized to [0, 1].
    #[error("radar value for '{axis}' is outside [0, 1] ({value})")]
    ValueOutOfRange {
        /// Axis label
        axis: String,
        /// Offending value
        value: f64,
    },

    /// A radar polygon needs at least three axes.
    #[error("radar chart needs at least 3 axes, got {0}")]
    TooFewAxes(usize),
}

/// Key-value storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Storage is not available (e.g., disabled by the browser)
    #[error("storage not available")]
    NotAvailable,

    /// Storage quota exceeded
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// Access denied
    #[error("storage access denied")]
    AccessDenied,

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Hex color parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Not 6 or 8 hex digits.
    #[error("hex color must have 6 or 8 digits, got {0}")]
    InvalidLength(usize),

    /// A pair is not valid hexadecimal.
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or shape error.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or shape error.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Values parsed but are inconsistent.
    #[error("invalid config value: {0}")]
    Invalid(String),
}
