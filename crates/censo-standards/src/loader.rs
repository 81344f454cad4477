//! Registry document parsing and validation.

use std::collections::BTreeMap;

use crate::error::{Result, StandardsError};
use crate::types::IndicatorDescriptor;

/// Parse the indicator document and validate every descriptor.
pub fn load_indicators_from_str(
    content: &str,
    file: &'static str,
) -> Result<BTreeMap<String, IndicatorDescriptor>> {
    let mut indicators: BTreeMap<String, IndicatorDescriptor> =
        serde_json::from_str(content).map_err(|source| StandardsError::Parse { file, source })?;

    for (code, descriptor) in &mut indicators {
        descriptor.code = code.clone();
        validate_descriptor(descriptor)?;
    }

    Ok(indicators)
}

/// Parse the categorical document.
pub fn load_categoricals_from_str(
    content: &str,
    file: &'static str,
) -> Result<BTreeMap<String, BTreeMap<String, String>>> {
    let maps: BTreeMap<String, BTreeMap<String, String>> =
        serde_json::from_str(content).map_err(|source| StandardsError::Parse { file, source })?;

    for (column, map) in &maps {
        if map.is_empty() {
            tracing::warn!(column = %column, "categorical column has an empty recode table");
        }
    }

    Ok(maps)
}

fn validate_descriptor(descriptor: &IndicatorDescriptor) -> Result<()> {
    let invalid = |reason: String| StandardsError::InvalidDescriptor {
        code: descriptor.code.clone(),
        reason,
    };

    if descriptor.eras.is_empty() {
        return Err(invalid("no eras declared".to_string()));
    }

    for era in &descriptor.eras {
        if era.first_year > era.last_year {
            return Err(invalid(format!(
                "era {}-{} is reversed",
                era.first_year, era.last_year
            )));
        }
        if era.groups.is_empty() {
            return Err(invalid(format!(
                "era {}-{} declares no groups",
                era.first_year, era.last_year
            )));
        }
        if era.group_offset + era.groups.len() > era.trailing_width() {
            return Err(invalid(format!(
                "era {}-{}: group block {}+{} exceeds trailing width {}",
                era.first_year,
                era.last_year,
                era.group_offset,
                era.groups.len(),
                era.trailing_width()
            )));
        }
    }

    // Eras must not claim the same year twice.
    for (i, a) in descriptor.eras.iter().enumerate() {
        for b in descriptor.eras.iter().skip(i + 1) {
            if a.first_year <= b.last_year && b.first_year <= a.last_year {
                return Err(invalid(format!(
                    "eras {}-{} and {}-{} overlap",
                    a.first_year, a.last_year, b.first_year, b.last_year
                )));
            }
        }
    }

    Ok(())
}
