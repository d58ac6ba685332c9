//! Contradictory severity markers.

use voo_model::fields::{COMA_AVERE, SCORE_GLASGOW};
use voo_model::{ClinicalThresholds, YesNoVocabulary};

use crate::category::Category;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

pub fn check(
    reader: &RowReader<'_>,
    thresholds: &ClinicalThresholds,
    vocabulary: &YesNoVocabulary,
) -> Vec<ErrorSet> {
    if !(reader.has_column(COMA_AVERE) && reader.has_column(SCORE_GLASGOW)) {
        return Vec::new();
    }

    // A confirmed coma with a Glasgow score too high for one.
    vec![ErrorSet::new(
        "coma_score_haut",
        Category::MedicalIntegrity,
        reader.rows_where(|row| {
            reader.is_yes(COMA_AVERE, row, vocabulary)
                && reader
                    .number(SCORE_GLASGOW, row)
                    .is_some_and(|score| score > thresholds.glasgow_coma)
        }),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_coma_with_high_score() {
        let df = df! {
            "Coma avéré" => &[Some("Oui"), Some("Oui"), Some("Non"), Some("Oui")],
            "Score de galsgow" => &[Some(12.0), Some(8.0), Some(14.0), None],
        }
        .unwrap();

        let sets = check(
            &RowReader::new(&df),
            &ClinicalThresholds::default(),
            &YesNoVocabulary::default(),
        );

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].rows, vec![0]);
    }
}
