//! Vertical concatenation over the union of columns.

use std::collections::HashSet;

use polars::prelude::DataFrame;
use voo_common::{column_names, string_column, text_values};

use crate::error::Result;

/// Stacks tables in order. The result has every column seen in any table, in
/// first-appearance order; rows of a table lacking a column get nulls there.
///
/// Cells are carried as text; this stage runs before numeric coercion.
pub fn stack_tables(tables: &[DataFrame]) -> Result<DataFrame> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    for df in tables {
        for name in column_names(df) {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }

    let total_rows: usize = tables.iter().map(DataFrame::height).sum();
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let mut values = Vec::with_capacity(total_rows);
        for df in tables {
            match df.column(name) {
                Ok(column) => values.extend(text_values(column)),
                Err(_) => values.extend(std::iter::repeat_n(None, df.height())),
            }
        }
        columns.push(string_column(name, values));
    }

    let stacked = DataFrame::new(columns)?;
    tracing::debug!(
        tables = tables.len(),
        rows = stacked.height(),
        columns = stacked.width(),
        "stacked tables"
    );
    Ok(stacked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voo_common::string_column;

    #[test]
    fn test_stack_fills_missing_columns() {
        let first = DataFrame::new(vec![
            string_column("ID", vec![Some("A".to_string())]),
            string_column("F1__Hb", vec![Some("120".to_string())]),
        ])
        .unwrap();
        let second = DataFrame::new(vec![
            string_column("ID", vec![Some("B".to_string()), Some("C".to_string())]),
            string_column("F2__Hb", vec![None, Some("90".to_string())]),
        ])
        .unwrap();

        let stacked = stack_tables(&[first, second]).unwrap();

        assert_eq!(column_names(&stacked), vec!["ID", "F1__Hb", "F2__Hb"]);
        assert_eq!(stacked.height(), 3);
        assert_eq!(
            text_values(stacked.column("F1__Hb").unwrap()),
            vec![Some("120".to_string()), None, None]
        );
        assert_eq!(
            text_values(stacked.column("F2__Hb").unwrap()),
            vec![None, None, Some("90".to_string())]
        );
    }

    #[test]
    fn test_stack_nothing() {
        let stacked = stack_tables(&[]).unwrap();
        assert_eq!(stacked.height(), 0);
        assert_eq!(stacked.width(), 0);
    }
}
