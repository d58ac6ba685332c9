//! Inputs shared by every rule.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use voo_model::{CountryLookup, Schema};

/// What the rules need besides the table itself.
pub struct ValidationContext<'a> {
    pub schema: &'a Schema,
    pub countries: &'a dyn CountryLookup,
    /// "Today" for the future-date rules.
    pub reference_date: NaiveDate,
    /// Per-file `F<i>__` columns; yes/no discovery skips them.
    pub source_columns: BTreeSet<String>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        schema: &'a Schema,
        countries: &'a dyn CountryLookup,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            schema,
            countries,
            reference_date,
            source_columns: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_source_columns(mut self, source_columns: BTreeSet<String>) -> Self {
        self.source_columns = source_columns;
        self
    }
}
