//! Filename-variant resolution.
//!
//! Archive naming is inconsistent across release years: some workbooks carry
//! an "ATUALIZADO" suffix after a re-publication, and some microdados zips
//! extract into a directory whose name was mangled by a Latin-1/UTF-8 mixup.
//! Every known variant is tried in order; the first existing file wins.

use std::path::{Path, PathBuf};

use censo_model::GeographyBase;

use crate::error::{IngestError, Result};

/// Candidate paths for an indicator workbook, in resolution order.
pub fn indicator_candidates(
    root: &Path,
    source_file: &str,
    base: GeographyBase,
    year: i32,
) -> Vec<PathBuf> {
    let dir = root.join(source_file).join(base.dir_name());
    vec![
        dir.join(format!("{year}.xlsx")),
        dir.join(format!("{year} ATUALIZADO.xlsx")),
    ]
}

/// Candidate paths for a microdados CSV, in resolution order.
///
/// The last variant is the mojibake directory name some yearly zips extract
/// into; it is intentionally spelled with the mangled bytes.
pub fn microdados_candidates(root: &Path, year: i32) -> Vec<PathBuf> {
    let dir = root.join("microdados");
    vec![
        dir.join(format!("{year}.csv")),
        dir.join(format!("{year}.CSV")),
        dir.join(format!("{year}/dados/microdados_ed_basica_{year}.csv")),
        dir.join(format!(
            "Microdados do Censo Escolar da Educaçâo Básica {year}/dados/microdados_ed_basica_{year}.csv"
        )),
    ]
}

/// Return the first existing candidate, or `MissingSourceFile`.
pub fn resolve(source_id: &str, year: i32, candidates: Vec<PathBuf>) -> Result<PathBuf> {
    for candidate in &candidates {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "resolved source file");
            return Ok(candidate.clone());
        }
    }
    Err(IngestError::MissingSourceFile {
        source_id: source_id.to_string(),
        year,
        tried: candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn resolve_prefers_earlier_variants() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("AFD/municipios")).unwrap();
        fs::write(root.join("AFD/municipios/2019 ATUALIZADO.xlsx"), b"x").unwrap();

        let resolved = resolve(
            "AFD",
            2019,
            indicator_candidates(root, "AFD", GeographyBase::Municipios, 2019),
        )
        .unwrap();
        assert!(resolved.ends_with("2019 ATUALIZADO.xlsx"));

        // The plain name takes precedence once it exists.
        fs::write(root.join("AFD/municipios/2019.xlsx"), b"x").unwrap();
        let resolved = resolve(
            "AFD",
            2019,
            indicator_candidates(root, "AFD", GeographyBase::Municipios, 2019),
        )
        .unwrap();
        assert!(resolved.ends_with("2019.xlsx"));
    }

    #[test]
    fn resolve_reports_all_candidates_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(
            "microdados",
            2022,
            microdados_candidates(dir.path(), 2022),
        )
        .unwrap_err();
        match err {
            IngestError::MissingSourceFile { source_id, tried, .. } => {
                assert_eq!(source_id, "microdados");
                assert_eq!(tried.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn microdados_nested_variant_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let nested = root.join("microdados/2020/dados");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("microdados_ed_basica_2020.csv"), b"x").unwrap();

        let resolved = resolve("microdados", 2020, microdados_candidates(root, 2020)).unwrap();
        assert!(resolved.ends_with("microdados_ed_basica_2020.csv"));
    }
}
