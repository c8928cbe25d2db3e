//! Error types for arcgauge.

use crate::color::ColorParseError;
use thiserror::Error;

/// Errors raised at the fallible edges: configuration and output.
///
/// Widget operations themselves never fail.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// IO error while reading a config or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML config could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A color string was not valid hex.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    /// An angle was outside `[-360, 360]` or not finite.
    #[error("{field} must be within [-360, 360] degrees, got {value}")]
    AngleOutOfRange {
        /// Config field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Animation settings were unusable.
    #[error("invalid animation: {0}")]
    InvalidAnimation(String),
}

/// Result alias used throughout arcgauge.
pub type Result<T> = std::result::Result<T, GaugeError>;
