use std::io::{self, Write};
use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dpd_model::ProductStatus;

use crate::types::{IngestSummary, OutputSummary, RecordSource, ScopeFailure};

pub fn output_table(results: &[OutputSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scope"),
        header_cell("Category"),
        header_cell("Source"),
        header_cell("Input"),
        header_cell("Duplicates"),
        header_cell("Excluded"),
        header_cell("Written"),
        header_cell("Database"),
        header_cell("Curated"),
    ]);
    apply_table_style(&mut table);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_written = 0usize;
    for result in results {
        total_written += result.selected;
        let source = match result.source {
            RecordSource::Snapshot => "snapshot",
            RecordSource::Extracts => "extracts",
        };
        let curated = match &result.curated {
            Some(path) => Cell::new(format!("{} ({})", file_name(path), result.curated_entries)),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(result.status)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(result.category),
            Cell::new(source),
            Cell::new(result.input),
            count_cell(result.duplicates, Color::Yellow),
            count_cell(result.excluded, Color::DarkGrey),
            Cell::new(result.selected).fg(Color::Green),
            Cell::new(file_name(&result.database)),
            curated,
        ]);
    }
    if results.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new(total_written).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table
}

pub fn ingest_table(results: &[IngestSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scope"),
        header_cell("Rows loaded"),
        header_cell("Drug records"),
        header_cell("Snapshot"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for result in results {
        table.add_row(vec![
            Cell::new(result.status)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(result.rows_loaded),
            Cell::new(result.records),
            Cell::new(result.snapshot.display()),
        ]);
    }
    table
}

/// One row per scope: whether its extracts and its snapshot are present.
pub fn scopes_table(extracts: &[ProductStatus], snapshots: &[ProductStatus]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scope"),
        header_cell("Extracts"),
        header_cell("Snapshot"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    for status in ProductStatus::ALL {
        table.add_row(vec![
            Cell::new(status),
            presence_cell(extracts.contains(&status)),
            presence_cell(snapshots.contains(&status)),
        ]);
    }
    table
}

pub fn print_outputs<W: Write>(out: &mut W, results: &[OutputSummary]) -> io::Result<()> {
    writeln!(out, "{}", output_table(results))
}

pub fn print_ingests<W: Write>(out: &mut W, results: &[IngestSummary]) -> io::Result<()> {
    writeln!(out, "{}", ingest_table(results))
}

/// One line per failed scope with its full error chain.
pub fn print_failures<W: Write>(out: &mut W, failures: &[ScopeFailure]) -> io::Result<()> {
    for failure in failures {
        writeln!(out, "  error: {}: {:#}", failure.status, failure.error)?;
    }
    Ok(())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn presence_cell(present: bool) -> Cell {
    if present {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
