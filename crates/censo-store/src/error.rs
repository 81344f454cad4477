//! Error types for the partitioned store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading partitioned datasets.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("filesystem operation failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Frame to be written has no partition-key column.
    #[error("dataset {dataset} frame is missing the partition column '{column}'")]
    MissingPartitionKey { dataset: String, column: String },

    /// Partition-key column is not the canonical year type.
    #[error("dataset {dataset} partition column has type {dtype}, expected Int16")]
    PartitionKeyType { dataset: String, dtype: String },

    /// Partition directory name is not `NU_ANO_CENSO=<year>`.
    #[error("unrecognized partition directory: {path}")]
    InvalidPartitionDir { path: PathBuf },

    /// Dataset directory does not exist or holds no partitions.
    #[error("dataset has no partitions: {path}")]
    NoPartitions { path: PathBuf },

    /// Underlying Polars operation failed.
    #[error("store operation failed: {message}")]
    Polars { message: String },
}

impl From<polars::prelude::PolarsError> for StoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Polars {
            message: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
