//! Partition writing.
//!
//! One dataset is a directory tree `<root>/<name>.parquet/NU_ANO_CENSO=<year>/`
//! with the partition column encoded in the directory name, not the file.
//! A partition is replaced wholesale on every write — delete then recreate —
//! so reruns are idempotent per (dataset, year) and never append duplicates.

use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{BooleanChunked, DataFrame, ParquetCompression, ParquetWriter};

use censo_model::columns::NU_ANO_CENSO;

use crate::error::{Result, StoreError};
use crate::layout::{dataset_dir, partition_dir};

/// Write/overwrite the partitions for exactly the years present in `df`.
///
/// Returns the partition directories written, in year order.
pub fn write_partitions(
    df: &DataFrame,
    output_root: &Path,
    dataset_name: &str,
) -> Result<Vec<PathBuf>> {
    let years_column = df.column(NU_ANO_CENSO).map_err(|_| {
        StoreError::MissingPartitionKey {
            dataset: dataset_name.to_string(),
            column: NU_ANO_CENSO.to_string(),
        }
    })?;
    let years = years_column
        .i16()
        .map_err(|_| StoreError::PartitionKeyType {
            dataset: dataset_name.to_string(),
            dtype: years_column.dtype().to_string(),
        })?;

    let distinct: BTreeSet<i16> = years.into_iter().flatten().collect();

    let base = dataset_dir(output_root, dataset_name);
    let mut written = Vec::with_capacity(distinct.len());
    for year in distinct {
        let mask: BooleanChunked = years.into_iter().map(|value| value == Some(year)).collect();
        let mut partition = df.filter(&mask)?.drop(NU_ANO_CENSO)?;

        let dir = partition_dir(&base, i32::from(year));
        replace_dir(&dir)?;

        let file_path = dir.join("data.parquet");
        let file = File::create(&file_path).map_err(|source| StoreError::Io {
            path: file_path.clone(),
            source,
        })?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut partition)?;

        tracing::info!(
            dataset = dataset_name,
            year,
            rows = partition.height(),
            path = %dir.display(),
            "wrote partition"
        );
        written.push(dir);
    }

    Ok(written)
}

/// Delete-then-recreate a partition directory.
fn replace_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        tracing::debug!(path = %dir.display(), "overwriting existing partition");
        fs::remove_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use polars::prelude::{Column, DataType};

    fn typed_frame(years: &[i16], values: &[&str]) -> DataFrame {
        let years = Column::new(NU_ANO_CENSO.into(), years.to_vec());
        assert_eq!(years.dtype(), &DataType::Int16);
        let values = Column::new("NO_GEOGRAFIA".into(), values.to_vec());
        DataFrame::new(vec![years, values]).unwrap()
    }

    #[test]
    fn writes_one_directory_per_year() {
        let dir = tempfile::tempdir().unwrap();
        let frame = typed_frame(&[2016, 2016, 2017], &["Brasil", "Norte", "Brasil"]);

        let written = write_partitions(&frame, dir.path(), "ATU").unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("ATU.parquet/NU_ANO_CENSO=2016/data.parquet").is_file());
        assert!(dir.path().join("ATU.parquet/NU_ANO_CENSO=2017/data.parquet").is_file());
    }

    #[test]
    fn untyped_year_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let frame = df![NU_ANO_CENSO => ["2016"], "x" => ["y"]].unwrap();
        let err = write_partitions(&frame, dir.path(), "ATU").unwrap_err();
        assert!(matches!(err, StoreError::PartitionKeyType { .. }));
    }

    #[test]
    fn missing_year_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let frame = df!["x" => ["y"]].unwrap();
        let err = write_partitions(&frame, dir.path(), "ATU").unwrap_err();
        assert!(matches!(err, StoreError::MissingPartitionKey { .. }));
    }
}
