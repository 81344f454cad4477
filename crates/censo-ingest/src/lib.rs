//! Raw loading of yearly census releases.
//!
//! This crate turns one on-disk source file into one untyped Polars
//! DataFrame. It knows about the physical quirks of each release — filename
//! variants, header/footer skip profiles, the `--` missing sentinel, Latin-1
//! CSVs — and nothing about the canonical schema. Loading is read-only.
//!
//! # Example
//!
//! ```ignore
//! use censo_ingest::{load_indicator, load_microdados};
//! use censo_model::GeographyBase;
//!
//! let registry = censo_standards::Registry::load()?;
//! let afd = registry.indicator("AFD")?;
//! let raw = load_indicator(root, afd, GeographyBase::BrasilRegioesUfs, 2019)?;
//! let micro = load_microdados(root, 2019)?;
//! ```

mod csv;
mod error;
mod loader;
mod locate;
mod xlsx;

pub use error::{IngestError, Result};
pub use loader::{load_indicator, load_microdados};
