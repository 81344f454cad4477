//! Batch result types.

use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Logical dataset name of the per-school table.
pub const MICRODADOS: &str = "microdados";

/// Configuration of one batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root of the extracted raw archives.
    pub data_root: PathBuf,
    /// Root of the partitioned output store.
    pub output_root: PathBuf,
    /// Census years to process.
    pub years: RangeInclusive<i32>,
    /// Indicator codes to process; `None` means every registry entry.
    pub only: Option<Vec<String>>,
    /// Skip the microdados dataset entirely.
    pub skip_microdados: bool,
}

/// Lifecycle of one (source, year) cell.
///
/// Cells progress `Pending → Loaded → Normalized → Typed → Written`;
/// `Skipped` and `Failed` are the other terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Pending,
    Loaded,
    Normalized,
    Typed,
    Written,
    /// No source file published for this cell. Expected and benign.
    Skipped,
    /// Data or schema error. The batch continues with the next cell.
    Failed,
}

impl CellState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Written | Self::Skipped | Self::Failed)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Loaded => "LOADED",
            Self::Normalized => "NORMALIZED",
            Self::Typed => "TYPED",
            Self::Written => "WRITTEN",
            Self::Skipped => "SKIPPED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal report of one cell.
#[derive(Debug)]
pub struct CellReport {
    pub source_id: String,
    pub year: i32,
    pub state: CellState,
    /// Rows written to the store; zero unless `Written`.
    pub rows: usize,
    pub error: Option<String>,
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub cells: Vec<CellReport>,
}

impl BatchResult {
    pub fn written(&self) -> usize {
        self.count(CellState::Written)
    }

    pub fn skipped(&self) -> usize {
        self.count(CellState::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(CellState::Failed)
    }

    /// A non-zero failure count fails the overall job for CI purposes even
    /// though individual cells never abort the run.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }
}
