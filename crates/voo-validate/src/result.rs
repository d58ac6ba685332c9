//! Rule outcomes.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, PolarsResult};
use serde::Serialize;

use crate::category::Category;

/// Rows violating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSet {
    pub name: String,
    pub category: Category,
    /// Ascending row indices into the validated table.
    pub rows: Vec<usize>,
}

impl ErrorSet {
    pub fn new(name: impl Into<String>, category: Category, rows: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            category,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materializes the offending rows of `df`, in table order.
    pub fn frame(&self, df: &DataFrame) -> PolarsResult<DataFrame> {
        let mut keep = vec![false; df.height()];
        for &row in &self.rows {
            if let Some(slot) = keep.get_mut(row) {
                *slot = true;
            }
        }
        let mask = BooleanChunked::from_slice(self.name.as_str().into(), &keep);
        df.filter(&mask)
    }
}

/// Every rule outcome of one validation run, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleResults {
    sets: Vec<ErrorSet>,
}

impl RuleResults {
    /// Adds an outcome. A rule reported twice keeps its first position and its
    /// latest rows.
    pub fn push(&mut self, set: ErrorSet) {
        match self.sets.iter_mut().find(|existing| existing.name == set.name) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorSet> {
        self.sets.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ErrorSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    /// Number of rules evaluated, empty outcomes included.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Outcomes with at least one row.
    pub fn flagged(&self) -> impl Iterator<Item = &ErrorSet> {
        self.sets.iter().filter(|set| !set.is_empty())
    }

    /// Rule name and row count of every non-empty outcome.
    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.flagged()
            .map(|set| (set.name.as_str(), set.len()))
            .collect()
    }

    /// Distinct rows flagged by at least one rule.
    pub fn total_flagged_rows(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|set| set.rows.iter().copied())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Row counts summed per category, for categories with any row.
    pub fn counts_by_category(&self) -> Vec<(Category, usize)> {
        Category::all()
            .iter()
            .filter_map(|category| {
                let total: usize = self
                    .flagged()
                    .filter(|set| set.category == *category)
                    .map(ErrorSet::len)
                    .sum();
                (total > 0).then_some((*category, total))
            })
            .collect()
    }
}

impl Extend<ErrorSet> for RuleResults {
    fn extend<T: IntoIterator<Item = ErrorSet>>(&mut self, iter: T) {
        for set in iter {
            self.push(set);
        }
    }
}

impl<'a> IntoIterator for &'a RuleResults {
    type Item = &'a ErrorSet;
    type IntoIter = std::slice::Iter<'a, ErrorSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn results() -> RuleResults {
        let mut results = RuleResults::default();
        results.push(ErrorSet::new("manquant_Identifiant", Category::Completeness, vec![0, 2]));
        results.push(ErrorSet::new("hb_invalide", Category::Range, vec![]));
        results.push(ErrorSet::new("temperature_invalide", Category::Range, vec![2, 3]));
        results
    }

    #[test]
    fn test_counts_skip_empty_sets() {
        let results = results();
        assert_eq!(results.len(), 3);
        assert_eq!(
            results.counts(),
            vec![("manquant_Identifiant", 2), ("temperature_invalide", 2)]
        );
        assert_eq!(results.total_flagged_rows(), 3);
        assert_eq!(
            results.counts_by_category(),
            vec![(Category::Completeness, 2), (Category::Range, 2)]
        );
    }

    #[test]
    fn test_push_replaces_same_name_in_place() {
        let mut results = results();
        results.push(ErrorSet::new("manquant_Identifiant", Category::Completeness, vec![1]));
        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().next().map(|s| s.rows.clone()), Some(vec![1]));
    }

    #[test]
    fn test_frame_materializes_rows() {
        let column: Column = Series::new("Hb".into(), &[10.0, 120.0, 300.0]).into_column();
        let df = DataFrame::new(vec![column]).unwrap();
        let set = ErrorSet::new("hb_invalide", Category::Range, vec![0, 2]);

        let rows = set.frame(&df).unwrap();
        let values: Vec<Option<f64>> = rows.column("Hb").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(10.0), Some(300.0)]);
    }
}
