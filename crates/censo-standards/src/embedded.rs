//! Embedded registry data.
//!
//! Both mapping documents are embedded at compile time using `include_str!()`.
//! This eliminates runtime file I/O and path resolution issues.

/// Indicator descriptors: code → {name, skip profile, file family, eras}.
pub const INDICADORES_JSON: &str = include_str!("../data/indicadores.json");

/// Name of the indicator document, used in error messages.
pub const INDICADORES_FILE: &str = "indicadores.json";

/// Categorical recodes: column name → {raw code → canonical label}.
pub const CATEGORICOS_JSON: &str = include_str!("../data/categoricos.json");

/// Name of the categorical document, used in error messages.
pub const CATEGORICOS_FILE: &str = "categoricos.json";
