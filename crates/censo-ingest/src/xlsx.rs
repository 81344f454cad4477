//! XLSX loading with header/footer skip profiles.
//!
//! Indicator workbooks open with several rows of title and note text, then a
//! header row, the data block, and six trailing source-note rows. The skip
//! profile says how many rows sit above the header; everything is read
//! untyped (all-String) so the coercer owns every typing decision.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::{Column, DataFrame};

use censo_model::format_numeric;
use censo_standards::SkipProfile;

use crate::error::{IngestError, Result};

/// Sentinel the workbooks use for missing metric values.
const MISSING_SENTINEL: &str = "--";

/// Read the first worksheet of `path` applying `profile`.
pub fn load_xlsx(path: &Path, profile: SkipProfile) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let Some(sheet_name) = sheet_names.first() else {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    };

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let (height, width) = range.get_size();
    tracing::debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = height,
        columns = width,
        "read worksheet"
    );

    let rows: Vec<Vec<Option<String>>> = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    frame_from_rows(&rows, profile, path)
}

/// Stringify one cell. Empty cells, the `--` sentinel, and error cells all
/// become null; floats lose a spurious trailing `.0`.
fn cell_value(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == MISSING_SENTINEL {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(format_numeric(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Data::DateTime(dt) => Some(format_numeric(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Build an untyped frame from stringified rows.
///
/// The row right after the header skip is the raw header row; the last
/// `footer_rows` rows are discarded. Header text is kept verbatim because
/// renaming is positional and happens downstream.
pub(crate) fn frame_from_rows(
    rows: &[Vec<Option<String>>],
    profile: SkipProfile,
    path: &Path,
) -> Result<DataFrame> {
    let header_skip = profile.header_rows();
    let footer = profile.footer_rows();
    if rows.len() < header_skip + 1 + footer {
        return Err(IngestError::NotEnoughRows {
            path: path.to_path_buf(),
            rows: rows.len(),
            profile: profile.to_string(),
        });
    }

    let header = &rows[header_skip];
    let data = &rows[header_skip + 1..rows.len() - footer];

    let width = data
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let names = unique_names(header, width);
    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<Option<String>> = data
                .iter()
                .map(|row| row.get(idx).cloned().flatten())
                .collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    DataFrame::new(columns).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Header names, padded to `width` and de-duplicated with a numeric suffix.
/// Group headers legitimately repeat across blocks in shared workbooks.
fn unique_names(header: &[Option<String>], width: usize) -> Vec<String> {
    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    (0..width)
        .map(|idx| {
            let base = header
                .get(idx)
                .cloned()
                .flatten()
                .unwrap_or_else(|| format!("col_{idx}"));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base.clone()
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}
