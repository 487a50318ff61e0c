//! Coercion of untrusted JSON scalars into the primitive types the canonical
//! records use. Every function has a defined fallback and never panics.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Naive (zone-less) datetime layouts accepted by [`normalize_date`]; read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Numbers pass through; numeric strings are parsed; anything else is `0`.
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// [`to_number`] that keeps absence (missing, `null`, or blank string) as `None`.
#[must_use]
pub fn opt_number(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(to_number(v)),
    }
}

/// Non-negative whole count; fractional parts are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_count(value: &Value) -> u64 {
    let n = to_number(value);
    if n <= 0.0 {
        0
    } else {
        n.trunc() as u64
    }
}

/// Booleans pass through; numbers are truthy when nonzero; strings are truthy
/// for `"true"`, `"1"`, or `"yes"` in any case.
#[must_use]
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1" || s.eq_ignore_ascii_case("yes")
        }
        _ => false,
    }
}

#[must_use]
pub fn opt_boolean(value: Option<&Value>) -> Option<bool> {
    value.filter(|v| !v.is_null()).map(to_boolean)
}

/// Strings (trimmed, non-empty) and numbers rendered as text.
#[must_use]
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[must_use]
pub fn opt_text(value: Option<&Value>) -> Option<String> {
    value.and_then(to_text)
}

/// Normalizes a timestamp to ISO-8601 UTC with millisecond precision.
///
/// - missing, `null`, blank, or non-scalar input yields the current instant;
/// - RFC 3339, naive datetimes, bare dates, and epoch milliseconds are
///   reformatted;
/// - any other string is returned unchanged.
#[must_use]
pub fn normalize_date(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return format_iso(Utc::now());
            }
            parse_date_str(trimmed).map_or_else(|| raw.clone(), format_iso)
        }
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map_or_else(|| format_iso(Utc::now()), format_iso),
        _ => format_iso(Utc::now()),
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn format_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn to_number_passes_numbers_through() {
        assert!((to_number(&json!(12.5)) - 12.5).abs() < f64::EPSILON);
        assert!((to_number(&json!(-3)) + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn to_number_parses_strings() {
        assert!((to_number(&json!(" 99.90 ")) - 99.9).abs() < f64::EPSILON);
    }

    #[test]
    fn to_number_falls_back_to_zero() {
        for v in [json!("abc"), json!("NaN"), json!(""), json!(true), json!(null), json!([1])] {
            assert!(to_number(&v).abs() < f64::EPSILON, "{v} should coerce to 0");
        }
    }

    #[test]
    fn opt_number_keeps_absence() {
        assert_eq!(opt_number(None), None);
        assert_eq!(opt_number(Some(&json!(null))), None);
        assert_eq!(opt_number(Some(&json!("  "))), None);
        assert_eq!(opt_number(Some(&json!("7"))), Some(7.0));
    }

    #[test]
    fn to_count_truncates_and_clamps() {
        assert_eq!(to_count(&json!(3.9)), 3);
        assert_eq!(to_count(&json!(-2)), 0);
        assert_eq!(to_count(&json!("41")), 41);
    }

    #[test]
    fn to_boolean_rules() {
        assert!(to_boolean(&json!(true)));
        assert!(to_boolean(&json!(2)));
        assert!(!to_boolean(&json!(0)));
        assert!(to_boolean(&json!("TRUE")));
        assert!(to_boolean(&json!("Yes")));
        assert!(to_boolean(&json!("1")));
        assert!(!to_boolean(&json!("no")));
        assert!(!to_boolean(&json!("0")));
        assert!(!to_boolean(&json!(null)));
        assert!(!to_boolean(&json!({})));
    }

    #[test]
    fn to_text_renders_numbers() {
        assert_eq!(to_text(&json!(42)), Some("42".to_string()));
        assert_eq!(to_text(&json!("  sku-1 ")), Some("sku-1".to_string()));
        assert_eq!(to_text(&json!("   ")), None);
        assert_eq!(to_text(&json!(false)), None);
    }

    #[test]
    fn normalize_date_reformats_rfc3339() {
        assert_eq!(
            normalize_date(Some(&json!("2024-05-01T17:00:00+07:00"))),
            "2024-05-01T10:00:00.000Z"
        );
    }

    #[test]
    fn normalize_date_reads_naive_values_as_utc() {
        assert_eq!(
            normalize_date(Some(&json!("2024-05-01T10:00:00.1234567"))),
            "2024-05-01T10:00:00.123Z"
        );
        assert_eq!(
            normalize_date(Some(&json!("2024-05-01"))),
            "2024-05-01T00:00:00.000Z"
        );
    }

    #[test]
    fn normalize_date_reads_epoch_millis() {
        assert_eq!(
            normalize_date(Some(&json!(1_714_557_600_000_i64))),
            "2024-05-01T10:00:00.000Z"
        );
    }

    #[test]
    fn normalize_date_is_idempotent() {
        let once = normalize_date(Some(&json!("2024-05-01 10:00:00")));
        let twice = normalize_date(Some(&json!(once.clone())));
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_date_returns_unparseable_string_unchanged() {
        assert_eq!(normalize_date(Some(&json!("last tuesday"))), "last tuesday");
    }

    #[test]
    fn normalize_date_missing_is_now() {
        let before = Utc::now() - chrono::Duration::seconds(1);
        let produced = normalize_date(None);
        let parsed = DateTime::parse_from_rfc3339(&produced).unwrap();
        assert!(parsed >= before);
    }
}
