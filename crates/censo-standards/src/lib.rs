//! Column mapping registry for the school-census sources.
//!
//! Every yearly release reshuffles headers, column counts, and encodings; the
//! registry is the single place that knows how each source layout maps onto
//! the canonical schema. It is exhaustive on purpose: a categorical column or
//! a year layout the registry does not know is a configuration error, never a
//! warning, because unmapped codes are indistinguishable from valid data once
//! they reach the store.
//!
//! # Contents
//!
//! - Indicator descriptors: display name, header/footer skip profile, source
//!   file family, and per-era ordered group labels (an era is a contiguous
//!   year range with one stable raw column layout)
//! - Categorical recodes: raw code → canonical label, per column
//!
//! All registry data is embedded at compile time with `include_str!`, so the
//! pipeline needs no runtime configuration files.

mod embedded;
mod error;
mod loader;
mod registry;
mod types;

pub use error::{Result, StandardsError};
pub use registry::Registry;
pub use types::{Era, IndicatorDescriptor, SkipProfile};

/// Codes the sources use for "unknown" in categorical columns.
///
/// These map to null during coercion even when a column's recode table would
/// otherwise be consulted.
pub const SENTINEL_CODES: [&str; 2] = ["-1", "9"];
