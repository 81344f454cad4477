//! Partition reading.
//!
//! Reads always span every year partition transparently; the partition
//! column is restored from the directory name the writer encoded it into.

use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, DataFrame, IntoLazy, LazyFrame, ParquetReader, SerReader};

use censo_model::columns::NU_ANO_CENSO;

use crate::error::{Result, StoreError};
use crate::layout::{dataset_dir, partition_year};

/// Read an entire dataset across all of its year partitions.
pub fn read_dataset(output_root: &Path, dataset_name: &str) -> Result<DataFrame> {
    let base = dataset_dir(output_root, dataset_name);
    let entries = fs::read_dir(&base).map_err(|source| StoreError::Io {
        path: base.clone(),
        source,
    })?;

    // Partitions keyed by year so concatenation order is deterministic.
    let mut partitions: BTreeMap<i16, DataFrame> = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: base.clone(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let dir_name = entry.file_name();
        let Some(year) = partition_year(&dir_name.to_string_lossy()) else {
            return Err(StoreError::InvalidPartitionDir { path });
        };
        partitions.insert(year, read_partition(&path, year)?);
    }

    let mut iter = partitions.into_values();
    let Some(mut combined) = iter.next() else {
        return Err(StoreError::NoPartitions { path: base });
    };
    for frame in iter {
        combined.vstack_mut(&frame).map(|_| ())?;
    }
    Ok(combined)
}

/// Read a dataset lazily, for query composition.
pub fn scan_dataset(output_root: &Path, dataset_name: &str) -> Result<LazyFrame> {
    Ok(read_dataset(output_root, dataset_name)?.lazy())
}

fn read_partition(dir: &Path, year: i16) -> Result<DataFrame> {
    let mut parts: Vec<DataFrame> = Vec::new();
    let entries = fs::read_dir(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "parquet") {
            continue;
        }
        let file = File::open(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        parts.push(ParquetReader::new(file).finish()?);
    }

    let mut iter = parts.into_iter();
    let Some(mut frame) = iter.next() else {
        return Err(StoreError::NoPartitions {
            path: dir.to_path_buf(),
        });
    };
    for part in iter {
        frame.vstack_mut(&part).map(|_| ())?;
    }

    // Restore the partition column, leading as in the canonical schema.
    let height = frame.height();
    frame.with_column(Column::new(NU_ANO_CENSO.into(), vec![year; height]))?;
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let ordered: Vec<&str> = std::iter::once(NU_ANO_CENSO)
        .chain(
            names
                .iter()
                .map(String::as_str)
                .filter(|n| *n != NU_ANO_CENSO),
        )
        .collect();
    Ok(frame.select(ordered)?)
}
