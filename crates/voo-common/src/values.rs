//! Polars `AnyValue` conversion helpers.
//!
//! Every stage of the pipeline treats a cell as missing when it is null or when
//! its text form is blank, so the helpers here are the single place where that
//! rule lives.

use polars::prelude::AnyValue;

/// Text form of a cell: empty for null, floats without trailing zeros.
///
/// ```
/// use polars::prelude::AnyValue;
/// use voo_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(37.0)), "37");
/// assert_eq!(any_to_string(AnyValue::String("Oui")), "Oui");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_owned(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => {
            let text = other.to_string();
            match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
                Some(inner) => inner.to_string(),
                None => text,
            }
        }
    }
}

/// Returns true when the cell is null, blank, or a float NaN.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Shortest decimal form of `v`; `37.0` becomes `"37"`.
pub fn format_numeric(v: f64) -> String {
    // Display already drops a zero fraction; only the sign of zero needs care.
    if v == 0.0 { "0".to_string() } else { v.to_string() }
}

/// Numeric value of a cell. Text is parsed with [`parse_f64`]; booleans,
/// nulls and non-finite values give `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Null | AnyValue::Boolean(_) => None,
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        other => other.extract::<f64>(),
    };
    number.filter(|v| v.is_finite())
}

/// Parses measurement text such as `"37.5"`, `" 4 "` or `"37,5"`.
///
/// A single comma counts as the decimal separator when no dot is present.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(37.0)), "37");
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(&AnyValue::Null));
        assert!(is_missing(&AnyValue::String("   ")));
        assert!(is_missing(&AnyValue::Float64(f64::NAN)));
        assert!(!is_missing(&AnyValue::String("Non")));
        assert!(!is_missing(&AnyValue::Float64(0.0)));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(40.0), "40");
        assert_eq!(format_numeric(265.5), "265.5");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("positif")), None);
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
    }

    #[test]
    fn test_parse_f64_decimal_comma() {
        assert_eq!(parse_f64("37,5"), Some(37.5));
        assert_eq!(parse_f64(" 4 "), Some(4.0));
        assert_eq!(parse_f64("1,234.5"), None);
        assert_eq!(parse_f64("1,2,3"), None);
        assert_eq!(parse_f64("nan"), None);
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64(""), None);
    }
}
