//! Error types for raw loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating and reading raw source files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// No filename variant resolved for a (source, year, base) triple.
    ///
    /// Expected for years not yet published; the orchestrator skips the cell.
    #[error("no source file found for {source_id}/{year} (tried {})", format_tried(.tried))]
    MissingSourceFile {
        source_id: String,
        year: i32,
        tried: Vec<PathBuf>,
    },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or parse an XLSX workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook has no sheets.
    #[error("workbook has no sheets: {path}")]
    EmptyWorkbook { path: PathBuf },

    /// Fewer rows than the skip profile requires.
    #[error("workbook {path} has {rows} rows, fewer than the {profile} skip profile needs")]
    NotEnoughRows {
        path: PathBuf,
        rows: usize,
        profile: String,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

fn format_tried(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_file_lists_candidates() {
        let err = IngestError::MissingSourceFile {
            source_id: "AFD".to_string(),
            year: 2022,
            tried: vec![PathBuf::from("/a/2022.xlsx"), PathBuf::from("/b/2022.xlsx")],
        };
        let message = err.to_string();
        assert!(message.contains("AFD/2022"));
        assert!(message.contains("/a/2022.xlsx"));
        assert!(message.contains("/b/2022.xlsx"));
    }
}
