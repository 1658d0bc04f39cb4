//! Error types for catalog data operations.
//!
//! Covers data file I/O, JSON and YAML (de)serialization, and the range and
//! index checks the request commands apply to loaded data.

use thiserror::Error;

/// Errors that can occur while generating, reading or selecting data.
#[derive(Debug, Error)]
pub enum DataError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Range string is neither `all` nor `start-end`.
    #[error("invalid range format '{0}', use 'all' or 'start-end'")]
    InvalidRange(String),

    /// Range is reversed or reaches past the data.
    #[error("range {start}-{end} does not fit {len} item(s)")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    /// Index reaches past the data.
    #[error("index {index} is out of bounds for {len} item(s)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Requested data type has no generator.
    #[error("invalid type '{value}', supported types are: {supported}")]
    UnknownDataKind { value: String, supported: String },
}

/// Convenience alias for results with [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;
