//! Lenient date parsing for the export date columns.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];

/// Parses a date or date-time, day first. Dates without a time are midnight.
///
/// Returns `None` for anything unrecognized.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_day_first() {
        assert_eq!(parse_date("03/04/2024"), Some(ymd(2024, 4, 3)));
        assert_eq!(parse_date("03-04-2024"), Some(ymd(2024, 4, 3)));
        assert_eq!(parse_date("03.04.2024"), Some(ymd(2024, 4, 3)));
    }

    #[test]
    fn test_iso_and_time() {
        assert_eq!(parse_date(" 2024-04-03 "), Some(ymd(2024, 4, 3)));
        let with_time = parse_date("03/04/2024 10:30").unwrap();
        assert_eq!(with_time.date(), NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
        assert_eq!(with_time.time(), NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert!(parse_date("2024-04-03T08:00:00").is_some());
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("inconnue"), None);
        assert_eq!(parse_date("31/02/2024"), None);
    }
}
