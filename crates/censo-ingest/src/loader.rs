//! Public loading entry points.

use std::path::Path;

use polars::prelude::DataFrame;

use censo_model::GeographyBase;
use censo_standards::IndicatorDescriptor;

use crate::csv::load_latin1_csv;
use crate::error::Result;
use crate::locate::{indicator_candidates, microdados_candidates, resolve};
use crate::xlsx::load_xlsx;

/// Load the raw workbook for one (indicator, base, year) triple.
///
/// The returned frame is untyped: header text is kept verbatim and every
/// cell is a nullable string.
///
/// # Errors
///
/// `MissingSourceFile` when no filename variant exists on disk — the caller
/// decides whether that skips the cell. Workbook errors are fatal to the
/// cell.
pub fn load_indicator(
    root: &Path,
    descriptor: &IndicatorDescriptor,
    base: GeographyBase,
    year: i32,
) -> Result<DataFrame> {
    let candidates = indicator_candidates(root, &descriptor.source_file, base, year);
    let path = resolve(&descriptor.code, year, candidates)?;
    tracing::info!(
        indicator = %descriptor.code,
        base = %base,
        year,
        path = %path.display(),
        "loading indicator workbook"
    );
    load_xlsx(&path, descriptor.skip_profile)
}

/// Load the raw microdados CSV for one year.
pub fn load_microdados(root: &Path, year: i32) -> Result<DataFrame> {
    let path = resolve("microdados", year, microdados_candidates(root, year))?;
    tracing::info!(year, path = %path.display(), "loading microdados CSV");
    load_latin1_csv(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use std::fs;

    #[test]
    fn microdados_loads_through_variant_chain() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("microdados")).unwrap();
        fs::write(
            root.join("microdados/2021.csv"),
            b"NU_ANO_CENSO;CO_ENTIDADE\n2021;11000023\n",
        )
        .unwrap();

        let df = load_microdados(root, 2021).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn absent_year_is_missing_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_microdados(dir.path(), 2030).unwrap_err();
        assert!(matches!(err, IngestError::MissingSourceFile { .. }));
    }
}
