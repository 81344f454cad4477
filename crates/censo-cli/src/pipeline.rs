//! Batch orchestration.
//!
//! The orchestrator iterates the (source × year) cross-product strictly
//! sequentially, driving Loader → Normalizer → Coercer → Writer per cell.
//! Cells are independent: a missing source file skips its cell, a data error
//! fails its cell, and the batch always continues to the next one.

use polars::prelude::DataFrame;
use tracing::{debug, error, info, warn};

use censo_ingest::{IngestError, load_indicator, load_microdados};
use censo_model::{DatasetKind, GeographyBase};
use censo_standards::{IndicatorDescriptor, Registry};
use censo_store::write_partitions;
use censo_transform::{coerce, concat_bases, normalize_indicator, normalize_microdados};

use crate::types::{BatchResult, CellReport, CellState, MICRODADOS, RunConfig};

/// Run the full batch: every selected indicator and (unless skipped) the
/// microdados dataset, across every selected year.
pub fn run_batch(config: &RunConfig, registry: &Registry) -> anyhow::Result<BatchResult> {
    let mut result = BatchResult::default();

    for descriptor in registry.indicators() {
        if let Some(only) = &config.only
            && !only.iter().any(|code| code == &descriptor.code)
        {
            continue;
        }
        for year in config.years.clone() {
            let report = process_indicator_cell(config, registry, descriptor, year);
            log_report(&report);
            result.cells.push(report);
        }
    }

    if !config.skip_microdados {
        for year in config.years.clone() {
            let report = process_microdados_cell(config, registry, year);
            log_report(&report);
            result.cells.push(report);
        }
    }

    info!(
        written = result.written(),
        skipped = result.skipped(),
        failed = result.failed(),
        "batch finished"
    );
    Ok(result)
}

/// One indicator cell: both geography bases loaded and normalized
/// independently, concatenated, typed, written.
fn process_indicator_cell(
    config: &RunConfig,
    registry: &Registry,
    descriptor: &IndicatorDescriptor,
    year: i32,
) -> CellReport {
    let mut state = CellState::Pending;
    let mut frames = Vec::new();

    for base in GeographyBase::all() {
        let raw = match load_indicator(&config.data_root, descriptor, *base, year) {
            Ok(raw) => raw,
            Err(IngestError::MissingSourceFile { .. }) => {
                debug!(indicator = %descriptor.code, base = %base, year, "source file not published");
                continue;
            }
            Err(e) => return failed(&descriptor.code, year, state, &e),
        };
        state = CellState::Loaded;

        match normalize_indicator(&raw, descriptor, *base, year) {
            Ok(long) => frames.push(long),
            Err(e) => return failed(&descriptor.code, year, state, &e),
        }
        state = CellState::Normalized;
    }

    // Only when no base resolved is the cell skipped; a single published
    // base still yields a (partial-geography) partition.
    if frames.is_empty() {
        return CellReport {
            source_id: descriptor.code.clone(),
            year,
            state: CellState::Skipped,
            rows: 0,
            error: None,
        };
    }

    let long = match concat_bases(frames) {
        Ok(long) => long,
        Err(e) => return failed(&descriptor.code, year, state, &e),
    };

    write_cell(config, registry, &descriptor.code, year, long, DatasetKind::Indicator, state)
}

/// One microdados cell.
fn process_microdados_cell(config: &RunConfig, registry: &Registry, year: i32) -> CellReport {
    let mut state = CellState::Pending;

    let raw = match load_microdados(&config.data_root, year) {
        Ok(raw) => raw,
        Err(IngestError::MissingSourceFile { .. }) => {
            return CellReport {
                source_id: MICRODADOS.to_string(),
                year,
                state: CellState::Skipped,
                rows: 0,
                error: None,
            };
        }
        Err(e) => return failed(MICRODADOS, year, state, &e),
    };
    state = CellState::Loaded;

    let long = match normalize_microdados(raw) {
        Ok(long) => long,
        Err(e) => return failed(MICRODADOS, year, state, &e),
    };
    state = CellState::Normalized;

    write_cell(config, registry, MICRODADOS, year, long, DatasetKind::Microdados, state)
}

/// Shared tail of every cell: coerce then write.
fn write_cell(
    config: &RunConfig,
    registry: &Registry,
    source_id: &str,
    year: i32,
    long: DataFrame,
    kind: DatasetKind,
    mut state: CellState,
) -> CellReport {
    let typed = match coerce(long, kind, registry) {
        Ok(typed) => typed,
        Err(e) => return failed(source_id, year, state, &e),
    };
    state = CellState::Typed;

    let rows = typed.height();
    match write_partitions(&typed, &config.output_root, source_id) {
        Ok(_) => CellReport {
            source_id: source_id.to_string(),
            year,
            state: CellState::Written,
            rows,
            error: None,
        },
        Err(e) => failed(source_id, year, state, &e),
    }
}

fn failed(
    source_id: &str,
    year: i32,
    reached: CellState,
    err: &dyn std::error::Error,
) -> CellReport {
    error!(source = source_id, year, stage = %reached, error = %err, "cell failed");
    CellReport {
        source_id: source_id.to_string(),
        year,
        state: CellState::Failed,
        rows: 0,
        error: Some(err.to_string()),
    }
}

fn log_report(report: &CellReport) {
    match report.state {
        CellState::Written => {
            info!(source = %report.source_id, year = report.year, rows = report.rows, "cell written");
        }
        CellState::Skipped => {
            warn!(source = %report.source_id, year = report.year, "cell skipped: no source file");
        }
        _ => {}
    }
}
