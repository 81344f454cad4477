//! Error types for normalization and coercion.

use thiserror::Error;

/// Errors that can occur while reshaping or typing a frame.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The raw trailing-column count does not match what the registry
    /// declares for the era. Catches silent schema drift before it can
    /// corrupt the store.
    #[error(
        "group count mismatch for {indicator}/{year}: registry declares {expected} trailing columns, file has {actual}"
    )]
    GroupCountMismatch {
        indicator: String,
        year: i32,
        expected: usize,
        actual: usize,
    },

    /// Categorical columns with no recode table in the registry. Fatal:
    /// unmapped codes are indistinguishable from valid labels downstream.
    #[error("categorical columns not mapped: {}", .columns.join(", "))]
    UnmappedCategoricalColumns { columns: Vec<String> },

    /// A required column is absent from the frame.
    #[error("column '{column}' not found in frame")]
    MissingColumn { column: String },

    /// A value failed a required typed cast.
    #[error("column '{column}' holds a value that cannot be coerced: {value}")]
    ValueParse { column: String, value: String },

    /// Registry lookup failed (unknown indicator or uncovered year).
    #[error(transparent)]
    Standards(#[from] censo_standards::StandardsError),

    /// Underlying DataFrame operation failed.
    #[error("frame operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
