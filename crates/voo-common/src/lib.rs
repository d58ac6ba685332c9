//! Shared utilities for the VOO crates.
//!
//! Cell conversion helpers for Polars `AnyValue`s and a few row-oriented
//! accessors used by the transform, validation and report stages.

mod frame;
mod values;

pub use frame::{
    cell_text, column_names, has_column, row_non_missing_counts, string_column, text_values,
};
pub use values::{any_to_f64, any_to_string, format_numeric, is_missing, parse_f64};
