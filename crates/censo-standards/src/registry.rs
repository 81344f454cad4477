//! Registry facade over the embedded mapping documents.

use std::collections::BTreeMap;

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::loader;
use crate::types::IndicatorDescriptor;

/// Unified access to indicator descriptors and categorical recodes.
#[derive(Debug)]
pub struct Registry {
    indicators: BTreeMap<String, IndicatorDescriptor>,
    categoricals: BTreeMap<String, BTreeMap<String, String>>,
}

impl Registry {
    /// Load the registry from the embedded documents.
    ///
    /// # Errors
    ///
    /// Returns an error if either document fails to parse or a descriptor is
    /// internally inconsistent. Both cases are build-time defects; there is
    /// no runtime fallback.
    pub fn load() -> Result<Self> {
        Self::from_strs(embedded::INDICADORES_JSON, embedded::CATEGORICOS_JSON)
    }

    /// Load a registry from raw JSON content (used by tests).
    pub fn from_strs(indicators_json: &str, categoricals_json: &str) -> Result<Self> {
        let indicators =
            loader::load_indicators_from_str(indicators_json, embedded::INDICADORES_FILE)?;
        let categoricals =
            loader::load_categoricals_from_str(categoricals_json, embedded::CATEGORICOS_FILE)?;
        Ok(Self {
            indicators,
            categoricals,
        })
    }

    /// Look up the descriptor for an indicator code.
    pub fn indicator(&self, code: &str) -> Result<&IndicatorDescriptor> {
        self.indicators
            .get(code)
            .ok_or_else(|| StandardsError::UnknownIndicator {
                code: code.to_string(),
            })
    }

    /// All declared indicator codes, sorted.
    pub fn indicator_codes(&self) -> impl Iterator<Item = &str> {
        self.indicators.keys().map(String::as_str)
    }

    /// All descriptors, sorted by code.
    pub fn indicators(&self) -> impl Iterator<Item = &IndicatorDescriptor> {
        self.indicators.values()
    }

    /// Code → label recode table for a categorical column, if declared.
    pub fn categorical(&self, column: &str) -> Option<&BTreeMap<String, String>> {
        self.categoricals.get(column)
    }
}
