//! On-disk layout of the partitioned store.

use std::path::{Path, PathBuf};

use censo_model::columns::NU_ANO_CENSO;

/// Directory of one logical dataset.
pub fn dataset_dir(output_root: &Path, dataset_name: &str) -> PathBuf {
    output_root.join(format!("{dataset_name}.parquet"))
}

/// Directory of one year partition.
pub fn partition_dir(dataset_dir: &Path, year: i32) -> PathBuf {
    dataset_dir.join(format!("{NU_ANO_CENSO}={year}"))
}

/// Parse the year out of a partition directory name.
pub fn partition_year(dir_name: &str) -> Option<i16> {
    let prefix = format!("{NU_ANO_CENSO}=");
    dir_name.strip_prefix(&prefix)?.parse().ok()
}
