//! Defensive extraction helpers over raw JSON records.
//!
//! Common value and date accessors used by the normalizer. All of them
//! return `Option` — absence, nulls, and type mismatches degrade to
//! `None`, never to an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Returns the first present, non-null value among `names`.
#[must_use]
pub fn first_value<'a>(
    record: &'a serde_json::Value,
    names: &[&str],
) -> Option<&'a serde_json::Value> {
    names
        .iter()
        .filter_map(|name| record.get(name))
        .find(|v| !v.is_null())
}

/// Returns the first non-empty string among `names`.
#[must_use]
pub fn first_str<'a>(record: &'a serde_json::Value, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| record.get(name).and_then(serde_json::Value::as_str))
        .find(|s| !s.trim().is_empty())
}

/// Returns the first non-empty string among `names`, converting bare
/// numbers to their text form (some endpoints return numeric wards and
/// IDs).
#[must_use]
pub fn first_string(record: &serde_json::Value, names: &[&str]) -> Option<String> {
    for name in names {
        match record.get(name) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.clone());
            }
            Some(serde_json::Value::Number(n)) => {
                return Some(n.as_i64().map_or_else(|| n.to_string(), |i| i.to_string()));
            }
            _ => {}
        }
    }
    None
}

/// Returns the first numeric value among `names` as `u64`. Accepts
/// floats with no fractional part and numeric strings.
#[must_use]
pub fn first_u64(record: &serde_json::Value, names: &[&str]) -> Option<u64> {
    for name in names {
        match record.get(name) {
            Some(serde_json::Value::Number(n)) => {
                if let Some(u) = n.as_u64() {
                    return Some(u);
                }
                if let Some(f) = n.as_f64()
                    && f >= 0.0
                    && f.fract() == 0.0
                {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    return Some(f as u64);
                }
            }
            Some(serde_json::Value::String(s)) => {
                if let Ok(u) = s.trim().parse::<u64>() {
                    return Some(u);
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns the first numeric value among `names` as `f64`. Accepts
/// numeric strings.
#[must_use]
pub fn first_f64(record: &serde_json::Value, names: &[&str]) -> Option<f64> {
    for name in names {
        match record.get(name) {
            Some(serde_json::Value::Number(n)) => return n.as_f64(),
            Some(serde_json::Value::String(s)) => {
                if let Ok(f) = s.trim().parse::<f64>() {
                    return Some(f);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parses a backend timestamp string.
///
/// Accepts RFC 3339 (what normalized records serialize back to), naive
/// ISO 8601 with or without fractional seconds (what the backend
/// emits), and bare dates. Anything else yields `None` rather than an
/// error — an unparseable date must never sink the record.
#[must_use]
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

/// Returns the first parseable timestamp among `names`.
#[must_use]
pub fn first_datetime(record: &serde_json::Value, names: &[&str]) -> Option<DateTime<Utc>> {
    names
        .iter()
        .filter_map(|name| record.get(name).and_then(serde_json::Value::as_str))
        .find_map(parse_datetime)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_str_skips_empty_and_null() {
        let record = json!({ "a": null, "b": "  ", "c": "value" });
        assert_eq!(first_str(&record, &["a", "b", "c"]), Some("value"));
        assert_eq!(first_str(&record, &["a", "b"]), None);
    }

    #[test]
    fn first_string_converts_numbers() {
        let record = json!({ "ward_no": 5 });
        assert_eq!(
            first_string(&record, &["ward", "ward_no"]),
            Some("5".to_owned())
        );
    }

    #[test]
    fn first_u64_accepts_floats_and_strings() {
        assert_eq!(first_u64(&json!({ "n": 3 }), &["n"]), Some(3));
        assert_eq!(first_u64(&json!({ "n": 3.0 }), &["n"]), Some(3));
        assert_eq!(first_u64(&json!({ "n": "3" }), &["n"]), Some(3));
        assert_eq!(first_u64(&json!({ "n": 3.5 }), &["n"]), None);
        assert_eq!(first_u64(&json!({ "n": -1 }), &["n"]), None);
    }

    #[test]
    fn parses_backend_iso_datetime() {
        let dt = parse_datetime("2024-01-15T14:30:00.123456").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00.123456 UTC");
        let dt = parse_datetime("2024-01-15T14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00 UTC");
    }

    #[test]
    fn parses_rfc3339_round_trip() {
        let dt = parse_datetime("2024-01-15T14:30:00Z").unwrap();
        assert_eq!(parse_datetime(&dt.to_rfc3339()), Some(dt));
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_datetime("2024-01-15").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 00:00:00 UTC");
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_datetime("not-a-date").is_none());
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("15/01/2024").is_none());
    }
}
