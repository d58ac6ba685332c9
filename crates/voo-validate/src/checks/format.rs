//! Country names and yes/no answers.

use std::collections::BTreeSet;

use voo_model::fields::COUNTRIES;
use voo_model::{CountryLookup, YesNoVocabulary};

use crate::category::Category;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

pub fn check(
    reader: &RowReader<'_>,
    countries: &dyn CountryLookup,
    vocabulary: &YesNoVocabulary,
    source_columns: &BTreeSet<String>,
) -> Vec<ErrorSet> {
    let mut sets = Vec::new();

    // Missing names are not valid names either.
    for column in reader.present(COUNTRIES) {
        sets.push(ErrorSet::new(
            format!("{column}_invalide"),
            Category::Format,
            reader.rows_where(|row| {
                reader
                    .text(column, row)
                    .is_none_or(|name| !countries.is_valid(&name))
            }),
        ));
    }

    for column in yes_no_columns(reader, vocabulary, source_columns) {
        sets.push(ErrorSet::new(
            format!("{column}_bool_format"),
            Category::Format,
            reader.rows_where(|row| {
                reader
                    .text(&column, row)
                    .is_none_or(|value| !vocabulary.contains(&value))
            }),
        ));
    }

    sets
}

/// Columns answered only with yes/no tokens.
///
/// Per-file source columns are skipped; a column qualifies when it has at
/// least one value and every value is a yes or no token.
pub fn yes_no_columns(
    reader: &RowReader<'_>,
    vocabulary: &YesNoVocabulary,
    source_columns: &BTreeSet<String>,
) -> Vec<String> {
    reader
        .frame()
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .filter(|name| !source_columns.contains(name))
        .filter(|name| {
            let mut values = (0..reader.height()).filter_map(|row| reader.text(name, row));
            let mut seen = false;
            let all_tokens = values.all(|value| {
                seen = true;
                vocabulary.contains(&value)
            });
            seen && all_tokens
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use voo_model::CountryList;

    fn countries() -> CountryList {
        CountryList::from_text("France\nMali\nCôte d'Ivoire\n")
    }

    #[test]
    fn test_country_names() {
        let df = df! {
            "Pays de résidence" => &[Some("France"), Some("france"), None, Some(" Mali ")],
        }
        .unwrap();

        let sets = check(
            &RowReader::new(&df),
            &countries(),
            &YesNoVocabulary::default(),
            &BTreeSet::new(),
        );

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "Pays de résidence_invalide");
        assert_eq!(sets[0].rows, vec![1, 2]);
    }

    #[test]
    fn test_yes_no_discovery() {
        let df = df! {
            "Coma avéré" => &[Some("Oui"), None, Some("Non")],
            "F1__Coma avéré" => &[Some("Oui"), None, Some("Non")],
            "Test de diagnostic rapide (TDR)" => &[Some("Oui"), Some("Peut-être"), Some("Non")],
            "Vide" => &[None::<&str>, None, None],
        }
        .unwrap();
        let reader = RowReader::new(&df);
        let sources = BTreeSet::from(["F1__Coma avéré".to_string()]);
        let vocabulary = YesNoVocabulary::default();

        assert_eq!(
            yes_no_columns(&reader, &vocabulary, &sources),
            vec!["Coma avéré".to_string()]
        );

        let sets = check(&reader, &countries(), &vocabulary, &sources);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "Coma avéré_bool_format");
        assert_eq!(sets[0].rows, vec![1]);
    }
}
