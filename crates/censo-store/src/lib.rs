//! Year-partitioned Parquet store.
//!
//! The physical contract of the pipeline's output: one directory per logical
//! dataset, one overwritable subdirectory per census year, snappy-compressed
//! Parquet inside. Writing replaces partitions; reading spans them
//! transparently; SQL consumers go through [`DatasetCatalog`].

mod catalog;
mod error;
mod layout;
mod reader;
mod writer;

pub use catalog::DatasetCatalog;
pub use error::{Result, StoreError};
pub use reader::{read_dataset, scan_dataset};
pub use writer::write_partitions;
