//! Per-file column namespacing.
//!
//! Every column except the excluded ones (the identifier) is renamed to
//! `F<i>__<name>` with `i` the 1-based ingestion index. The rename table is kept
//! so later stages look up per-file variants by name instead of matching
//! patterns against the live column set.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame};

use crate::error::{Result, TransformError};

/// Separator between the file tag and the original column name.
pub const SOURCE_SEPARATOR: &str = "__";

/// Tag of the file at a 1-based ingestion index (`F1`, `F2`, …).
pub fn file_tag(file_index: usize) -> String {
    format!("F{file_index}")
}

/// Prefixed name of `column` in the file at `file_index`.
pub fn prefixed_name(file_index: usize, column: &str) -> String {
    format!("{}{SOURCE_SEPARATOR}{column}", file_tag(file_index))
}

/// Rename table of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileColumns {
    pub file_index: usize,
    /// `(original, prefixed)` pairs in column order.
    renames: Vec<(String, String)>,
}

impl FileColumns {
    /// Prefixed name of an original column, if the file had it.
    pub fn prefixed(&self, original: &str) -> Option<&str> {
        self.renames
            .iter()
            .find(|(name, _)| name == original)
            .map(|(_, prefixed)| prefixed.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renames.iter().map(|(o, p)| (o.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Rename tables of all files, in ingestion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    files: Vec<FileColumns>,
}

impl NamespaceMap {
    pub fn files(&self) -> &[FileColumns] {
        &self.files
    }

    /// Prefixed variants of `target` in ascending file index.
    pub fn candidates(&self, target: &str) -> Vec<&str> {
        self.files
            .iter()
            .filter_map(|file| file.prefixed(target))
            .collect()
    }

    /// Every prefixed column produced by namespacing.
    pub fn source_columns(&self) -> BTreeSet<String> {
        self.files
            .iter()
            .flat_map(|file| file.renames.iter().map(|(_, p)| p.clone()))
            .collect()
    }
}

/// Prefixes every non-excluded column of each table with its file tag.
pub fn namespace_tables(
    tables: &[DataFrame],
    excluded: &[&str],
) -> Result<(Vec<DataFrame>, NamespaceMap)> {
    let mut namespaced = Vec::with_capacity(tables.len());
    let mut map = NamespaceMap::default();

    for (offset, df) in tables.iter().enumerate() {
        let file_index = offset + 1;
        let mut renames = Vec::new();
        let mut used = BTreeSet::new();
        let mut columns: Vec<Column> = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let original = column.name().to_string();
            let name = if excluded.contains(&original.as_str()) {
                original.clone()
            } else {
                let prefixed = prefixed_name(file_index, &original);
                renames.push((original, prefixed.clone()));
                prefixed
            };
            if !used.insert(name.clone()) {
                return Err(TransformError::ColumnCollision {
                    column: name,
                    file_index,
                });
            }
            columns.push(column.clone().with_name(name.as_str().into()));
        }

        namespaced.push(DataFrame::new(columns)?);
        map.files.push(FileColumns {
            file_index,
            renames,
        });
    }

    Ok((namespaced, map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voo_common::{column_names, string_column};

    fn table(names: &[&str]) -> DataFrame {
        DataFrame::new(
            names
                .iter()
                .map(|name| string_column(name, vec![Some("v".to_string())]))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_prefixed_name() {
        assert_eq!(prefixed_name(2, "Hb"), "F2__Hb");
        assert_eq!(file_tag(1), "F1");
    }

    #[test]
    fn test_namespace_tables() {
        let tables = vec![table(&["ID", "Hb"]), table(&["Hb", "ID", "Température"])];

        let (namespaced, map) = namespace_tables(&tables, &["ID"]).unwrap();

        assert_eq!(column_names(&namespaced[0]), vec!["ID", "F1__Hb"]);
        assert_eq!(
            column_names(&namespaced[1]),
            vec!["F2__Hb", "ID", "F2__Température"]
        );
        assert_eq!(map.candidates("Hb"), vec!["F1__Hb", "F2__Hb"]);
        assert_eq!(map.candidates("Température"), vec!["F2__Température"]);
        assert!(map.candidates("ID").is_empty());
        assert_eq!(map.source_columns().len(), 3);
    }

    #[test]
    fn test_collision_with_excluded_column() {
        let tables = vec![table(&["F1__Hb", "Hb"])];

        let err = namespace_tables(&tables, &["F1__Hb"]).unwrap_err();

        assert!(matches!(
            err,
            TransformError::ColumnCollision { file_index: 1, .. }
        ));
    }
}
