//! Date ordering and future dates.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use voo_model::fields::{DATE_DIAGNOSTIC, DATE_PREMIERS_SYMPTOMES_ACCES, DATE_SYMPTOMES, TRACKED_DATES};

use crate::category::Category;
use crate::dates::parse_date;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

pub fn check(reader: &RowReader<'_>, reference_date: NaiveDate) -> Vec<ErrorSet> {
    let parsed: HashMap<&str, Vec<Option<NaiveDateTime>>> = reader
        .present(TRACKED_DATES)
        .into_iter()
        .map(|column| (column, parse_column(reader, column)))
        .collect();

    let mut sets = Vec::new();

    if let Some(set) = later_than(&parsed, "symptomes_diagnostic", DATE_SYMPTOMES, DATE_DIAGNOSTIC) {
        sets.push(set);
    }
    if let Some(set) = later_than(
        &parsed,
        "acces_symptomes",
        DATE_PREMIERS_SYMPTOMES_ACCES,
        DATE_SYMPTOMES,
    ) {
        sets.push(set);
    }

    let cutoff = reference_date.and_time(NaiveTime::MIN);
    for column in TRACKED_DATES {
        let Some(dates) = parsed.get(column) else {
            continue;
        };
        sets.push(ErrorSet::new(
            format!("{column}_futur"),
            Category::Temporal,
            rows_matching(dates, |date| date > cutoff),
        ));
    }

    sets
}

fn parse_column(reader: &RowReader<'_>, column: &str) -> Vec<Option<NaiveDateTime>> {
    (0..reader.height())
        .map(|row| reader.text(column, row).and_then(|value| parse_date(&value)))
        .collect()
}

/// Rows where `first` is strictly after `second`; unparseable dates never match.
fn later_than(
    parsed: &HashMap<&str, Vec<Option<NaiveDateTime>>>,
    rule: &str,
    first: &str,
    second: &str,
) -> Option<ErrorSet> {
    let (first, second) = (parsed.get(first)?, parsed.get(second)?);
    let rows = first
        .iter()
        .zip(second)
        .enumerate()
        .filter_map(|(row, pair)| match pair {
            (Some(a), Some(b)) if a > b => Some(row),
            _ => None,
        })
        .collect();
    Some(ErrorSet::new(rule, Category::Temporal, rows))
}

fn rows_matching<F>(dates: &[Option<NaiveDateTime>], predicate: F) -> Vec<usize>
where
    F: Fn(NaiveDateTime) -> bool,
{
    dates
        .iter()
        .enumerate()
        .filter_map(|(row, date)| date.filter(|d| predicate(*d)).map(|_| row))
        .collect()
}
