//! Most-complete-row deduplication.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray};
use voo_common::{cell_text, row_non_missing_counts, string_column};

use crate::error::Result;

/// Result of a deduplication pass.
#[derive(Debug, Clone)]
pub struct DedupeOutcome {
    pub frame: DataFrame,
    /// Number of rows collapsed into another row with the same key.
    pub dropped: usize,
}

/// Keeps one row per distinct key: the row with the most non-missing cells
/// across all columns, the earliest one on ties.
///
/// Key values are compared after trimming. Rows with any missing key cell are
/// always kept, since a missing key cannot be matched. Kept rows stay in input
/// order. When none of the key columns exists the frame is returned unchanged.
pub fn keep_most_complete(df: &DataFrame, keys: &[&str]) -> Result<DedupeOutcome> {
    let Some(plan) = plan_rows(df, keys) else {
        return Ok(DedupeOutcome {
            frame: df.clone(),
            dropped: 0,
        });
    };

    let mask = BooleanChunked::from_slice("dedupe".into(), &plan.keep);
    let frame = df.filter(&mask)?;
    tracing::debug!(
        rows_in = df.height(),
        rows_out = frame.height(),
        dropped = plan.dropped(),
        "deduplicated by key"
    );
    Ok(DedupeOutcome {
        frame,
        dropped: plan.dropped(),
    })
}

/// Like [`keep_most_complete`], then fills the missing cells of each kept row
/// from the rows it replaced, taken in input order.
///
/// The kept row is the same one [`keep_most_complete`] picks, and every cell it
/// already holds stays as is. That includes unprefixed canonical columns: after
/// merging rows from several files, rebuild them from the `F<i>__` columns with
/// [`rebuild_canonical`](crate::rebuild_canonical) so file order decides again.
/// Columns come back as `String` columns; run this before numeric coercion.
pub fn merge_duplicates(df: &DataFrame, keys: &[&str]) -> Result<DedupeOutcome> {
    let Some(plan) = plan_rows(df, keys) else {
        return Ok(DedupeOutcome {
            frame: df.clone(),
            dropped: 0,
        });
    };

    let kept: Vec<usize> = (0..df.height()).filter(|idx| plan.keep[*idx]).collect();
    let mut filled = 0usize;
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let values: Vec<Option<String>> = kept
            .iter()
            .map(|&idx| {
                cell_text(column, idx).or_else(|| {
                    let donor = plan
                        .replaced
                        .get(&idx)?
                        .iter()
                        .find_map(|&other| cell_text(column, other));
                    if donor.is_some() {
                        filled += 1;
                    }
                    donor
                })
            })
            .collect();
        columns.push(string_column(column.name().as_str(), values));
    }
    let frame = DataFrame::new(columns)?;

    tracing::debug!(
        rows_in = df.height(),
        rows_out = frame.height(),
        dropped = plan.dropped(),
        filled,
        "merged duplicate rows by key"
    );
    Ok(DedupeOutcome {
        frame,
        dropped: plan.dropped(),
    })
}

/// Which rows survive, and which rows each survivor replaced.
struct RowPlan {
    keep: Vec<bool>,
    replaced: HashMap<usize, Vec<usize>>,
}

impl RowPlan {
    fn dropped(&self) -> usize {
        self.keep.iter().filter(|kept| !**kept).count()
    }
}

/// Returns `None` when there is nothing to deduplicate.
fn plan_rows(df: &DataFrame, keys: &[&str]) -> Option<RowPlan> {
    if df.height() == 0 {
        return None;
    }
    let key_columns: Vec<&Column> = keys.iter().filter_map(|key| df.column(key).ok()).collect();
    if key_columns.is_empty() {
        tracing::warn!(?keys, "no key column present, rows kept as-is");
        return None;
    }

    let counts = row_non_missing_counts(df);
    let mut best: HashMap<Vec<String>, usize> = HashMap::new();
    let mut row_keys: Vec<Option<Vec<String>>> = Vec::with_capacity(df.height());

    for (idx, count) in counts.iter().enumerate() {
        let key: Option<Vec<String>> = key_columns
            .iter()
            .map(|column| cell_text(column, idx).map(|v| v.trim().to_string()))
            .collect();
        if let Some(key) = &key {
            match best.entry(key.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(idx);
                }
                Entry::Occupied(mut entry) => {
                    if *count > counts[*entry.get()] {
                        entry.insert(idx);
                    }
                }
            }
        }
        row_keys.push(key);
    }

    let mut keep = Vec::with_capacity(row_keys.len());
    let mut replaced: HashMap<usize, Vec<usize>> = HashMap::new();
    for (idx, key) in row_keys.iter().enumerate() {
        match key.as_ref().and_then(|key| best.get(key)) {
            None => keep.push(true),
            Some(&winner) if winner == idx => keep.push(true),
            Some(&winner) => {
                keep.push(false);
                replaced.entry(winner).or_default().push(idx);
            }
        }
    }

    Some(RowPlan { keep, replaced })
}
