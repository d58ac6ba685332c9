//! Canonical target columns coalesced from the per-file variants.

use polars::prelude::DataFrame;
use voo_common::{cell_text, string_column};

use crate::error::Result;
use crate::namespace::NamespaceMap;

/// Creates or refreshes the unprefixed column of every target.
///
/// Candidates are scanned per row in priority order: an existing unprefixed
/// column first, then `F1__<target>`, `F2__<target>`, … as recorded in the
/// rename table. The first non-missing value wins. Targets without any
/// candidate are not created. Candidate columns are left untouched.
pub fn canonicalize(df: &DataFrame, targets: &[&str], namespaces: &NamespaceMap) -> Result<DataFrame> {
    coalesce(df, targets, namespaces, true)
}

/// Rebuilds every target from its per-file variants alone, in file order.
///
/// Any existing unprefixed value is discarded. Run this after
/// [`merge_duplicates`](crate::merge_duplicates), whose surviving row may carry
/// the variants of several files while its canonical cells still reflect only
/// the file it came from. Targets without a per-file variant are left as they
/// are.
pub fn rebuild_canonical(
    df: &DataFrame,
    targets: &[&str],
    namespaces: &NamespaceMap,
) -> Result<DataFrame> {
    coalesce(df, targets, namespaces, false)
}

fn coalesce(
    df: &DataFrame,
    targets: &[&str],
    namespaces: &NamespaceMap,
    keep_existing: bool,
) -> Result<DataFrame> {
    let mut out = df.clone();

    for target in targets {
        let mut candidates = Vec::new();
        if keep_existing && let Ok(existing) = df.column(target) {
            candidates.push(existing);
        }
        for name in namespaces.candidates(target) {
            if let Ok(column) = df.column(name) {
                candidates.push(column);
            }
        }
        if candidates.is_empty() {
            continue;
        }

        let values: Vec<Option<String>> = (0..df.height())
            .map(|idx| {
                candidates
                    .iter()
                    .find_map(|column| cell_text(column, idx))
            })
            .collect();
        let filled = values.iter().filter(|v| v.is_some()).count();
        out.with_column(string_column(target, values))?;

        tracing::trace!(
            target_column = %target,
            sources = candidates.len(),
            filled,
            "coalesced target column"
        );
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::namespace_tables;
    use crate::stack::stack_tables;
    use voo_common::{column_names, text_values};

    fn text(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn hb_map(files: usize) -> NamespaceMap {
        let tables: Vec<DataFrame> = (0..files)
            .map(|_| DataFrame::new(vec![string_column("Hb", vec![None])]).unwrap())
            .collect();
        namespace_tables(&tables, &[]).unwrap().1
    }

    #[test]
    fn test_first_file_wins() {
        let df = DataFrame::new(vec![
            string_column("F1__Hb", text(&[Some("120"), None])),
            string_column("F2__Hb", text(&[Some("95"), Some("80")])),
        ])
        .unwrap();

        let out = canonicalize(&df, &["Hb"], &hb_map(2)).unwrap();

        assert_eq!(
            text_values(out.column("Hb").unwrap()),
            text(&[Some("120"), Some("80")])
        );
        assert_eq!(
            text_values(out.column("F2__Hb").unwrap()),
            text(&[Some("95"), Some("80")])
        );
    }

    #[test]
    fn test_existing_unprefixed_column_has_priority() {
        let df = DataFrame::new(vec![
            string_column("Hb", text(&[None, Some("60")])),
            string_column("F1__Hb", text(&[Some("120"), Some("130")])),
        ])
        .unwrap();

        let out = canonicalize(&df, &["Hb"], &hb_map(1)).unwrap();

        assert_eq!(column_names(&out), vec!["Hb", "F1__Hb"]);
        assert_eq!(
            text_values(out.column("Hb").unwrap()),
            text(&[Some("120"), Some("60")])
        );
    }

    #[test]
    fn test_targets_without_candidates_are_skipped() {
        let tables = vec![
            DataFrame::new(vec![
                string_column("ID", text(&[Some("X1"), Some("X2")])),
                string_column("Hb", text(&[None, Some("80")])),
            ])
            .unwrap(),
            DataFrame::new(vec![
                string_column("ID", text(&[Some("X3")])),
                string_column("Hb", text(&[Some("95")])),
            ])
            .unwrap(),
        ];
        let (namespaced, map) = namespace_tables(&tables, &["ID"]).unwrap();
        let stacked = stack_tables(&namespaced).unwrap();

        let out = canonicalize(&stacked, &["Hb", "Plaquettes"], &map).unwrap();

        assert_eq!(column_names(&out), vec!["ID", "F1__Hb", "F2__Hb", "Hb"]);
        assert_eq!(
            text_values(out.column("Hb").unwrap()),
            text(&[None, Some("80"), Some("95")])
        );
    }

    #[test]
    fn test_rebuild_ignores_stale_canonical_value() {
        let df = DataFrame::new(vec![
            string_column("F1__Hb", text(&[Some("120"), None])),
            string_column("F2__Hb", text(&[Some("95"), Some("80")])),
            string_column("Hb", text(&[Some("95"), Some("1")])),
        ])
        .unwrap();

        let out = rebuild_canonical(&df, &["Hb", "Plaquettes"], &hb_map(2)).unwrap();

        assert_eq!(column_names(&out), vec!["F1__Hb", "F2__Hb", "Hb"]);
        assert_eq!(
            text_values(out.column("Hb").unwrap()),
            text(&[Some("120"), Some("80")])
        );
    }
}
