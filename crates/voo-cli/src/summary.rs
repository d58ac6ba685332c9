use std::collections::BTreeSet;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use voo_common::cell_text;
use voo_model::Schema;

use crate::types::{OutputStatus, RunResult};

/// Widest preview, identifier included.
const PREVIEW_MAX_COLUMNS: usize = 8;

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    println!("{}", files_table(result));
    println!(
        "Consolidated: {} rows, {} columns ({} stacked rows, {} merged across files)",
        result.stats.final_rows,
        result.stats.final_columns,
        result.stats.stacked_rows,
        result.stats.cross_file_duplicates
    );
    if result.stats.non_numeric_values > 0 {
        println!(
            "Non-numeric values set to missing: {}",
            result.stats.non_numeric_values
        );
    }
    println!();

    if result.rules.is_empty() {
        println!("No errors detected");
    } else {
        println!("{}", rules_table(result));
    }

    println!();
    print_output_status("Cleaned table", &result.cleaned);
    print_output_status("Error report", &result.report);
}

pub fn print_summary_json(result: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize summary")?;
    println!("{json}");
    Ok(())
}

fn files_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Duplicates"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for file in &result.stats.files {
        table.add_row(vec![
            Cell::new(&file.source),
            Cell::new(file.rows),
            Cell::new(file.columns),
            count_cell(file.duplicates_dropped, Color::Yellow),
        ]);
    }
    table
}

fn rules_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Category"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for rule in &result.rules {
        table.add_row(vec![
            Cell::new(&rule.rule),
            Cell::new(rule.category.label()),
            count_cell(rule.rows, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("distinct rows"),
        count_cell(result.total_flagged_rows, Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

fn print_output_status(label: &str, status: &OutputStatus) {
    match status {
        OutputStatus::Written(path) => println!("{label}: {}", path.display()),
        OutputStatus::Skipped(reason) => println!("{label}: skipped ({reason})"),
        OutputStatus::Failed(message) => eprintln!("{label}: FAILED: {message}"),
    }
}

/// Prints the first `rows` rows of the consolidated table.
///
/// Per-file source columns are hidden, as are columns empty in every previewed
/// row.
pub fn print_preview(df: &DataFrame, rows: usize, hidden: &BTreeSet<String>) {
    let shown = rows.min(df.height());
    if shown == 0 {
        return;
    }
    let columns: Vec<_> = df
        .get_columns()
        .iter()
        .filter(|c| !hidden.contains(c.name().as_str()))
        .filter(|c| (0..shown).any(|row| cell_text(c, row).is_some()))
        .collect();

    let mut table = Table::new();
    table.set_header(
        columns
            .iter()
            .take(PREVIEW_MAX_COLUMNS)
            .map(|c| header_cell(c.name().as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in 0..shown {
        table.add_row(
            columns
                .iter()
                .take(PREVIEW_MAX_COLUMNS)
                .map(|c| cell_text(c, row).map_or_else(|| dim_cell("-"), Cell::new))
                .collect::<Vec<_>>(),
        );
    }
    println!("Preview ({shown} of {} rows):", df.height());
    println!("{table}");
    if columns.len() > PREVIEW_MAX_COLUMNS {
        println!(
            "{} more non-empty columns not shown",
            columns.len() - PREVIEW_MAX_COLUMNS
        );
    }
    println!();
}

/// Prints the fields and the bound checks of a schema.
pub fn print_fields(schema: &Schema) {
    println!("Identifier: {}", schema.identifier);
    let mut fields = Table::new();
    fields.set_header(vec![header_cell("Field"), header_cell("Kind")]);
    apply_table_style(&mut fields);
    for field in &schema.fields {
        fields.add_row(vec![Cell::new(&field.name), Cell::new(field.kind.label())]);
    }
    println!("{fields}");

    let mut checks = Table::new();
    checks.set_header(vec![
        header_cell("Rule"),
        header_cell("Field"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Kind"),
    ]);
    apply_table_style(&mut checks);
    align_column(&mut checks, 2, CellAlignment::Right);
    align_column(&mut checks, 3, CellAlignment::Right);
    let tagged = schema
        .range_checks
        .iter()
        .map(|c| (c, "range"))
        .chain(schema.outlier_checks.iter().map(|c| (c, "outlier")));
    for (check, kind) in tagged {
        checks.add_row(vec![
            Cell::new(&check.rule),
            Cell::new(&check.field),
            bound_cell(check.bounds.min),
            bound_cell(check.bounds.max),
            Cell::new(kind),
        ]);
    }
    println!("{checks}");
}

fn bound_cell(bound: Option<f64>) -> Cell {
    bound.map_or_else(|| dim_cell("-"), Cell::new)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
