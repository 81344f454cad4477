//! Dataset kinds, geography bases, and geography levels.

use serde::{Deserialize, Serialize};

use crate::columns::{PAIS_BRASIL, REGIOES};

/// The two logical dataset families the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    /// Wide per-school census records.
    Microdados,
    /// Long-form derived educational indicators.
    Indicator,
}

/// Granularity tier of a raw indicator file.
///
/// The two bases carry different leading-column layouts and are published as
/// separate yearly workbooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeographyBase {
    /// One row per municipality.
    Municipios,
    /// One row per country / region / state aggregate.
    BrasilRegioesUfs,
}

impl GeographyBase {
    /// Directory name under the dataset root, matching the archive layout.
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::Municipios => "municipios",
            Self::BrasilRegioesUfs => "brasil_regioes_ufs",
        }
    }

    /// Both bases, in the order they are concatenated for a cell.
    pub const fn all() -> &'static [GeographyBase] {
        &[Self::BrasilRegioesUfs, Self::Municipios]
    }
}

impl std::fmt::Display for GeographyBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Geography level tag attached to every normalized indicator row.
///
/// The raw files carry no explicit level column; aggregate-base rows are
/// classified from the geography name and municipality-base rows get a
/// constant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeographyLevel {
    Pais,
    Regiao,
    Uf,
    Municipio,
}

impl GeographyLevel {
    /// Display label stored in the `TP_NIVEL_GEOGRAFICO` column.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pais => "País",
            Self::Regiao => "Região",
            Self::Uf => "UF",
            Self::Municipio => "Município",
        }
    }

    /// Classify an aggregate-base geography name.
    pub fn classify(geography: &str) -> Self {
        let trimmed = geography.trim();
        if trimmed == PAIS_BRASIL {
            Self::Pais
        } else if REGIOES.contains(&trimmed) {
            Self::Regiao
        } else {
            Self::Uf
        }
    }
}

impl std::fmt::Display for GeographyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_country() {
        assert_eq!(GeographyLevel::classify("Brasil"), GeographyLevel::Pais);
    }

    #[test]
    fn classify_regions() {
        for regiao in REGIOES {
            assert_eq!(GeographyLevel::classify(regiao), GeographyLevel::Regiao);
        }
    }

    #[test]
    fn classify_state_fallback() {
        assert_eq!(GeographyLevel::classify("Acre"), GeographyLevel::Uf);
        assert_eq!(
            GeographyLevel::classify("Rio Grande do Sul"),
            GeographyLevel::Uf
        );
    }

    #[test]
    fn classify_trims_whitespace() {
        assert_eq!(GeographyLevel::classify(" Brasil "), GeographyLevel::Pais);
    }
}
