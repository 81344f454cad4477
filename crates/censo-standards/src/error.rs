//! Error types for registry loading and lookups.

use thiserror::Error;

/// Errors that can occur when loading or querying the mapping registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Embedded registry document failed to parse.
    #[error("failed to parse registry document {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A descriptor is internally inconsistent.
    #[error("invalid descriptor for indicator {code}: {reason}")]
    InvalidDescriptor { code: String, reason: String },

    /// Lookup for an indicator code the registry does not declare.
    #[error("unknown indicator code: {code}")]
    UnknownIndicator { code: String },

    /// A census year no era of the indicator covers. Raised instead of
    /// guessing the nearest layout when a new release changes shape.
    #[error("indicator {code} has no era covering year {year}")]
    EraNotCovered { code: String, year: i32 },
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
