//! Flags that contradict the values they summarize.

use voo_model::fields::{
    CREATININEMIE, CREATININEMIE_SUP_265, ESP_FALCIPARUM, ESP_NEGATIVE, PARASITEMIE,
    PARASITEMIE_SUP_4, SCORE_GLASGOW, TROUBLES_CONSCIENCE,
};
use voo_model::{ClinicalThresholds, YesNoVocabulary};

use crate::category::Category;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

pub fn check(
    reader: &RowReader<'_>,
    thresholds: &ClinicalThresholds,
    vocabulary: &YesNoVocabulary,
) -> Vec<ErrorSet> {
    let mut sets = Vec::new();
    let both = |a: &str, b: &str| reader.has_column(a) && reader.has_column(b);

    if both(ESP_FALCIPARUM, ESP_NEGATIVE) {
        sets.push(ErrorSet::new(
            "falciparum_et_negative",
            Category::Logical,
            reader.rows_where(|row| {
                reader.is_positive(ESP_FALCIPARUM, row) && reader.is_positive(ESP_NEGATIVE, row)
            }),
        ));
    }

    if both(PARASITEMIE_SUP_4, PARASITEMIE) {
        sets.push(ErrorSet::new(
            "parasitemie_incoherente",
            Category::Logical,
            reader.rows_where(|row| {
                reader.is_positive(PARASITEMIE_SUP_4, row)
                    && reader
                        .number(PARASITEMIE, row)
                        .is_some_and(|value| value <= thresholds.parasitemia_percent)
            }),
        ));
    }

    // A low score without a recorded consciousness disorder.
    if both(SCORE_GLASGOW, TROUBLES_CONSCIENCE) {
        sets.push(ErrorSet::new(
            "glasgow_et_conscience",
            Category::Logical,
            reader.rows_where(|row| {
                reader
                    .number(SCORE_GLASGOW, row)
                    .is_some_and(|score| score <= thresholds.glasgow_coma)
                    && !reader.is_yes(TROUBLES_CONSCIENCE, row, vocabulary)
            }),
        ));
    }

    if both(CREATININEMIE_SUP_265, CREATININEMIE) {
        sets.push(ErrorSet::new(
            "creat_incoherente",
            Category::Logical,
            reader.rows_where(|row| {
                reader.is_positive(CREATININEMIE_SUP_265, row)
                    && reader
                        .number(CREATININEMIE, row)
                        .is_some_and(|value| value <= thresholds.creatinine_umol_l)
            }),
        ));
    }

    sets
}
