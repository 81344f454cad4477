//! Microdados CSV loading.
//!
//! The yearly per-school CSVs are semicolon-delimited and Latin-1 encoded.
//! Bytes are transcoded up front with `encoding_rs` and every column is read
//! as String; typing belongs to the coercer.

use std::io::Cursor;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Read a Latin-1, `;`-delimited CSV into an all-String frame.
pub fn load_latin1_csv(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if had_errors {
        tracing::warn!(
            path = %path.display(),
            "CSV contained byte sequences invalid for Windows-1252; replacement characters inserted"
        );
    }

    let cursor = Cursor::new(decoded.into_owned().into_bytes());

    // infer_schema_length(0) keeps every column String so no value is
    // interpreted before the coercion rules run.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(b';'))
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_semicolon_latin1_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // "São Paulo" with Latin-1 bytes (0xE3 = ã).
        file.write_all(b"NU_ANO_CENSO;NO_MUNICIPIO;QT_MAT_BAS\n")
            .unwrap();
        file.write_all(b"2020;S\xE3o Paulo;120\n").unwrap();
        file.write_all(b"2020;Bel\xE9m;\n").unwrap();
        file.flush().unwrap();

        let df = load_latin1_csv(file.path()).unwrap();
        assert_eq!(df.height(), 2);

        let municipio = df.column("NO_MUNICIPIO").unwrap();
        assert_eq!(
            municipio.str().unwrap().get(0),
            Some("São Paulo"),
            "Latin-1 bytes must be transcoded"
        );

        // All columns stay untyped strings; empty fields become null.
        let counts = df.column("QT_MAT_BAS").unwrap();
        assert_eq!(counts.str().unwrap().get(0), Some("120"));
        assert_eq!(counts.str().unwrap().get(1), None);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_latin1_csv(Path::new("/nonexistent/2020.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
