//! Error types for flowlab-histo
//!
//! Out-of-domain fills are not errors: they are counted as overflows and
//! otherwise ignored. Everything here is recoverable by the caller.

use thiserror::Error;

use crate::histogram::Dimensionality;

/// Main error type for histogram operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoError {
    /// Bad bin count or domain bounds
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Operation not defined for this kind of histogram
    #[error("{operation} is not supported for a {dimensionality} histogram")]
    UnsupportedOperation {
        operation: &'static str,
        dimensionality: Dimensionality,
    },

    /// Operation needs at least one accepted entry
    #[error("Cannot {operation}: histogram has no entries")]
    EmptyDistribution { operation: &'static str },

    /// Two histograms with different axes cannot be combined
    #[error("Histogram geometry mismatch: {message}")]
    GeometryMismatch { message: String },

    /// No histogram with this title in the book
    #[error("Histogram not found: {title}")]
    UnknownHistogram { title: String },

    /// Title already used in the book
    #[error("Histogram already exists: {title}")]
    DuplicateHistogram { title: String },

    /// JSON or TOML definition could not be parsed
    #[error("Failed to parse histogram definition: {0}")]
    ConfigParse(String),
}

impl HistoError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        HistoError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for HistoError {
    fn from(err: serde_json::Error) -> Self {
        HistoError::ConfigParse(err.to_string())
    }
}

impl From<toml::de::Error> for HistoError {
    fn from(err: toml::de::Error) -> Self {
        HistoError::ConfigParse(err.to_string())
    }
}

/// Result type alias for histogram operations
pub type HistoResult<T> = Result<T, HistoError>;
