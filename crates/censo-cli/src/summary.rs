//! Batch summary tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use censo_standards::Registry;

use crate::types::{BatchResult, CellState};

/// Print the per-cell table and the terminal-state totals.
pub fn print_summary(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Year"),
        header_cell("State"),
        header_cell("Rows"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);

    for report in &result.cells {
        table.add_row(vec![
            Cell::new(&report.source_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(report.year),
            state_cell(report.state),
            rows_cell(report),
            match &report.error {
                Some(message) => Cell::new(message),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");

    println!(
        "Written: {}  Skipped: {}  Failed: {}",
        result.written(),
        result.skipped(),
        result.failed()
    );
    if result.has_failures() {
        eprintln!("error: {} cell(s) failed; see the table above", result.failed());
    }
}

/// Print the registry contents (`indicators` subcommand).
pub fn print_indicators(registry: &Registry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("File"),
        header_cell("Skip"),
        header_cell("Eras"),
        header_cell("Groups"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);

    for descriptor in registry.indicators() {
        let eras = descriptor
            .eras
            .iter()
            .map(|era| format!("{}-{}", era.first_year, era.last_year))
            .collect::<Vec<_>>()
            .join(", ");
        let groups = descriptor
            .eras
            .iter()
            .map(|era| era.groups.len().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&descriptor.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&descriptor.name),
            Cell::new(&descriptor.source_file),
            Cell::new(descriptor.skip_profile),
            Cell::new(eras),
            Cell::new(groups),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn state_cell(state: CellState) -> Cell {
    match state {
        CellState::Written => Cell::new(state.label())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        CellState::Skipped => Cell::new(state.label()).fg(Color::Yellow),
        CellState::Failed => Cell::new(state.label())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        other => Cell::new(other.label()),
    }
}

fn rows_cell(report: &crate::types::CellReport) -> Cell {
    if report.state == CellState::Written {
        Cell::new(report.rows)
    } else {
        dim_cell("-")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
