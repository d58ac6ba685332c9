//! Row-oriented accessors over Polars frames.

use polars::prelude::{AnyValue, Column, DataFrame};

use crate::values::{any_to_string, is_missing};

/// Returns the text of a cell, or `None` when the cell is missing.
///
/// The text is returned as stored; callers trim when comparing.
pub fn cell_text(column: &Column, idx: usize) -> Option<String> {
    let value = column.get(idx).unwrap_or(AnyValue::Null);
    if is_missing(&value) {
        None
    } else {
        Some(any_to_string(value))
    }
}

/// Collects every cell of a column as optional text.
pub fn text_values(column: &Column) -> Vec<Option<String>> {
    (0..column.len()).map(|idx| cell_text(column, idx)).collect()
}

/// Builds a `String` column from optional values.
pub fn string_column(name: &str, values: Vec<Option<String>>) -> Column {
    Column::new(name.into(), values)
}

/// Column names of a frame as owned strings, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Returns true when the frame has a column with this exact name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Counts the non-missing cells of each row across all columns.
pub fn row_non_missing_counts(df: &DataFrame) -> Vec<usize> {
    let mut counts = vec![0usize; df.height()];
    for column in df.get_columns() {
        for (idx, count) in counts.iter_mut().enumerate() {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            if !is_missing(&value) {
                *count += 1;
            }
        }
    }
    counts
}
