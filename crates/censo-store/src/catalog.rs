//! SQL access to the partitioned store.
//!
//! Downstream consumers (the dashboard layer lives outside this repository)
//! query the canonical schema through SQL. The catalog is an explicitly
//! passed handle with a scoped lifetime — opened, queried, dropped — rather
//! than a process-wide connection singleton.

use std::path::Path;

use polars::prelude::DataFrame;
use polars::sql::SQLContext;

use crate::error::Result;
use crate::reader::scan_dataset;

/// A scoped SQL handle over one or more partitioned datasets.
pub struct DatasetCatalog {
    ctx: SQLContext,
}

impl DatasetCatalog {
    /// Open a catalog and register each named dataset as a table.
    pub fn open(output_root: &Path, datasets: &[&str]) -> Result<Self> {
        let mut catalog = Self {
            ctx: SQLContext::new(),
        };
        for dataset in datasets {
            catalog.register(output_root, dataset)?;
        }
        Ok(catalog)
    }

    /// Register one dataset under its logical name.
    pub fn register(&mut self, output_root: &Path, dataset_name: &str) -> Result<()> {
        let lazy = scan_dataset(output_root, dataset_name)?;
        self.ctx.register(dataset_name, lazy);
        tracing::debug!(dataset = dataset_name, "registered dataset in SQL catalog");
        Ok(())
    }

    /// Run a query and collect the result.
    pub fn query(&mut self, sql: &str) -> Result<DataFrame> {
        Ok(self.ctx.execute(sql)?.collect()?)
    }
}
