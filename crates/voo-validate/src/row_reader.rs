//! Row accessor used by the rules.
//!
//! Wraps a frame and answers per-cell questions ("is this missing", "is this a
//! positive flag") so each rule reads as its condition. Absent columns read as
//! missing everywhere; callers check [`RowReader::has_column`] when a rule must
//! be skipped instead.

use polars::prelude::{AnyValue, Column, DataFrame};
use voo_common::{any_to_f64, cell_text};
use voo_model::{Bounds, YesNoVocabulary};

#[derive(Debug)]
pub struct RowReader<'a> {
    df: &'a DataFrame,
}

impl<'a> RowReader<'a> {
    #[inline]
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.df.height()
    }

    #[inline]
    pub fn frame(&self) -> &'a DataFrame {
        self.df
    }

    #[inline]
    pub fn column(&self, name: &str) -> Option<&'a Column> {
        self.df.column(name).ok()
    }

    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    /// Names among `names` that exist in the frame, in the given order.
    pub fn present<'n>(&self, names: &[&'n str]) -> Vec<&'n str> {
        names
            .iter()
            .copied()
            .filter(|name| self.has_column(name))
            .collect()
    }

    /// Trimmed text of a cell; `None` when missing or the column is absent.
    pub fn text(&self, column: &str, row: usize) -> Option<String> {
        let column = self.column(column)?;
        cell_text(column, row).map(|value| value.trim().to_string())
    }

    /// Numeric value of a cell; `None` when missing, non-numeric or absent.
    pub fn number(&self, column: &str, row: usize) -> Option<f64> {
        let column = self.column(column)?;
        any_to_f64(column.get(row).unwrap_or(AnyValue::Null))
    }

    pub fn is_missing(&self, column: &str, row: usize) -> bool {
        self.text(column, row).is_none()
    }

    /// A positive flag is a cell whose numeric value is exactly 1.
    pub fn is_positive(&self, column: &str, row: usize) -> bool {
        self.number(column, row) == Some(1.0)
    }

    pub fn is_yes(&self, column: &str, row: usize, vocabulary: &YesNoVocabulary) -> bool {
        self.text(column, row)
            .is_some_and(|value| vocabulary.is_yes(&value))
    }

    /// Indices of the rows satisfying `predicate`, ascending.
    pub fn rows_where<F>(&self, mut predicate: F) -> Vec<usize>
    where
        F: FnMut(usize) -> bool,
    {
        (0..self.height()).filter(|row| predicate(*row)).collect()
    }

    /// Rows whose cell is missing.
    pub fn missing_rows(&self, column: &str) -> Vec<usize> {
        self.rows_where(|row| self.is_missing(column, row))
    }

    /// Rows with a numeric value outside `bounds`; missing and non-numeric
    /// cells are never returned.
    pub fn rows_outside(&self, column: &str, bounds: &Bounds) -> Vec<usize> {
        self.rows_where(|row| {
            self.number(column, row)
                .is_some_and(|value| !bounds.contains(value))
        })
    }
}
