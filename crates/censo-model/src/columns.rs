//! Canonical column names.
//!
//! Downstream consumers query the partitioned store by these names, so they
//! are the contract of the whole pipeline. Indicator tables are long-form
//! (one row per group label); microdados keeps the wide per-school layout
//! with prefix-driven typing.

/// Census year. Also the partition key of every written dataset.
pub const NU_ANO_CENSO: &str = "NU_ANO_CENSO";

/// Constant country label.
pub const NO_PAIS: &str = "NO_PAIS";

/// Geography display name (country, region, state, or municipality).
pub const NO_GEOGRAFIA: &str = "NO_GEOGRAFIA";

/// Geography level tag derived from the geography name.
pub const TP_NIVEL_GEOGRAFICO: &str = "TP_NIVEL_GEOGRAFICO";

/// Locality category (Urbana / Rural / Total).
pub const NO_CATEGORIA: &str = "NO_CATEGORIA";

/// Administrative dependency (Federal / Estadual / Municipal / Privada / Total).
pub const NO_DEPENDENCIA: &str = "NO_DEPENDENCIA";

/// Indicator code (AFD, IED, ...).
pub const SG_INDICADOR: &str = "SG_INDICADOR";

/// Indicator display name.
pub const NO_INDICADOR: &str = "NO_INDICADOR";

/// Canonical group label (the disaggregation axis of an indicator).
pub const TP_GRUPO: &str = "TP_GRUPO";

/// Metric value. Nullable; never range-clamped here.
pub const METRICA: &str = "METRICA";

/// Value the raw files use for the country row.
pub const PAIS_BRASIL: &str = "Brasil";

/// Identifier set shared by both geography bases after normalization.
pub const INDICATOR_ID_COLUMNS: [&str; 4] =
    [NU_ANO_CENSO, NO_GEOGRAFIA, NO_CATEGORIA, NO_DEPENDENCIA];

/// The five geographic region names, used to classify aggregate-level rows.
pub const REGIOES: [&str; 5] = ["Norte", "Nordeste", "Sudeste", "Sul", "Centro-Oeste"];

// === Microdados prefix conventions ===

/// Tri-state service/access flags. Sentinel 9 means unknown.
pub const FLAG_PREFIX: &str = "IN_";

/// Enrollment and infrastructure counts. Absent means zero.
pub const COUNT_PREFIX: &str = "QT_";

/// Categorical codes recoded through the mapping registry.
pub const CATEGORICAL_PREFIX: &str = "TP_";

/// Timestamps in `%d%b%Y:%H:%M:%S` form.
pub const DATE_PREFIX: &str = "DT_";

/// Categorical columns that do not follow the `TP_` prefix convention.
pub const EXTRA_CATEGORICAL_COLUMNS: [&str; 3] = [
    "CO_LINGUA_INDIGENA_1",
    "CO_LINGUA_INDIGENA_2",
    "CO_LINGUA_INDIGENA_3",
];

/// Microdados identifier columns kept as opaque strings.
pub const STRING_ID_COLUMNS: [&str; 12] = [
    "NU_DDD",
    "NU_TELEFONE",
    "NU_CNPJ_ESCOLA_PRIVADA",
    "NU_CNPJ_MANTENEDORA",
    "CO_ESCOLA_SEDE_VINCULADA",
    "CO_IES_OFERTANTE",
    "CO_DISTRITO",
    "CO_CEP",
    "CO_REGIAO",
    "CO_UF",
    "CO_MESORREGIAO",
    "CO_MICRORREGIAO",
];

/// Microdados identifier columns coerced to 64-bit integers.
pub const INT_ID_COLUMNS: [&str; 2] = ["CO_MUNICIPIO", "CO_ENTIDADE"];

/// True for columns that hold categorical codes (prefix or enumerated).
pub fn is_categorical_column(name: &str) -> bool {
    name.starts_with(CATEGORICAL_PREFIX) || EXTRA_CATEGORICAL_COLUMNS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_detection_covers_prefix_and_extras() {
        assert!(is_categorical_column("TP_DEPENDENCIA"));
        assert!(is_categorical_column("CO_LINGUA_INDIGENA_2"));
        assert!(!is_categorical_column("CO_MUNICIPIO"));
        assert!(!is_categorical_column("IN_INTERNET"));
    }
}
