//! Canonical data model for the school-census ETL.
//!
//! This crate defines the stable, analysis-ready schema every yearly source
//! release is normalized into:
//!
//! - [`columns`]: canonical column names and the prefix conventions that
//!   drive type coercion
//! - [`kinds`]: dataset kinds, geography bases, and geography levels
//! - [`polars`]: Polars `AnyValue` utility functions shared by the pipeline
//!   crates

pub mod columns;
pub mod kinds;
pub mod polars;

pub use kinds::{DatasetKind, GeographyBase, GeographyLevel};

// Re-export value helpers at crate root for convenience
pub use polars::{any_to_string, format_numeric, parse_f64, parse_i64};
