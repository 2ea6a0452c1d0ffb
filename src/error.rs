use thiserror::Error;

/// Invalid input detected before any computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} is out of range ({expected})")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("unknown {kind} selector: {label:?}")]
    UnknownCurve { kind: &'static str, label: String },

    #[error("short-term parameters for a {config} do not match a {source_kind} source")]
    SourceMismatch {
        config: &'static str,
        source_kind: &'static str,
    },

    #[error("neither short-term nor long-term settlement is enabled")]
    NothingEnabled,

    #[error("long-term settlement requires a depth-to-bedrock raster")]
    MissingBedrock,

    #[error("no usable source geometry was supplied")]
    NoSources,

    #[error("source geometry {index} has non-finite coordinates")]
    NonFiniteSource { index: usize },

    #[error("invalid raster: {0}")]
    InvalidRaster(String),
}

impl ConfigError {
    /// Shorthand for an out-of-range parameter.
    pub(crate) fn range(parameter: &'static str, value: f64, expected: &'static str) -> Self {
        Self::OutOfRange { parameter, value, expected }
    }
}

/// Convenience type alias for results using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Require `value` to be finite and strictly positive.
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 { Ok(()) }
    else { Err(ConfigError::range(parameter, value, "finite and > 0")) }
}

/// Require `value` to be finite and non-negative.
pub(crate) fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 { Ok(()) }
    else { Err(ConfigError::range(parameter, value, "finite and >= 0")) }
}
