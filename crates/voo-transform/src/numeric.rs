//! Numeric coercion of the measurement columns.

use polars::prelude::{AnyValue, Column, DataFrame};
use voo_common::{any_to_f64, is_missing};

use crate::error::Result;

/// How many non-missing cells of a column could not be read as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionSummary {
    pub column: String,
    pub invalid: usize,
}

/// Replaces each listed column by a `Float64` column.
///
/// Unparseable or non-finite values become null. Columns absent from the frame
/// are skipped and get no summary.
pub fn coerce_numeric(df: &DataFrame, columns: &[&str]) -> Result<(DataFrame, Vec<CoercionSummary>)> {
    let mut out = df.clone();
    let mut summaries = Vec::new();

    for name in columns {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let mut invalid = 0;
        let values: Vec<Option<f64>> = (0..column.len())
            .map(|idx| {
                let value = column.get(idx).unwrap_or(AnyValue::Null);
                let missing = is_missing(&value);
                let number = any_to_f64(value);
                if number.is_none() && !missing {
                    invalid += 1;
                }
                number
            })
            .collect();
        out.with_column(Column::new((*name).into(), values))?;

        if invalid > 0 {
            tracing::debug!(column = %name, invalid, "non-numeric values set to null");
        }
        summaries.push(CoercionSummary {
            column: (*name).to_string(),
            invalid,
        });
    }

    Ok((out, summaries))
}
