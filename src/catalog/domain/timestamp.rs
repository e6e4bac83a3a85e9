//! Lenient timestamp parsing for catalog payloads.
//!
//! Pyxis mostly emits RFC 3339, but older records carry naive ISO-8601
//! values without an offset. Those are read as UTC. Numeric values are Unix
//! epochs: seconds, or milliseconds once the magnitude exceeds 2e10.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub type Timestamp = DateTime<Utc>;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Larger epoch values are taken as milliseconds
const EPOCH_MILLIS_THRESHOLD: f64 = 2e10;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Epoch(f64),
}

pub fn parse(raw: &str) -> Option<Timestamp> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Unix epoch in seconds, or in milliseconds above the threshold
pub fn from_epoch(value: f64) -> Option<Timestamp> {
    if !value.is_finite() {
        return None;
    }
    let millis = if value.abs() > EPOCH_MILLIS_THRESHOLD {
        value
    } else {
        value * 1000.0
    };
    let millis = millis.round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
}

/// `deserialize_with` helper for `Option<Timestamp>` fields
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(RawTimestamp::Text(value)) => parse(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", value))),
        Some(RawTimestamp::Epoch(value)) => from_epoch(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid epoch timestamp: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse("2024-03-01T10:15:30+02:00").unwrap();
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let ts = parse("2023-11-20T04:05:06.123456").unwrap();
        assert_eq!(ts.year(), 2023);
        assert_eq!(ts.hour(), 4);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn test_epoch_seconds_and_millis() {
        let seconds = from_epoch(1_700_000_000.0).unwrap();
        let millis = from_epoch(1_700_000_000_000.0).unwrap();
        assert_eq!(seconds, millis);
        assert_eq!(seconds.year(), 2023);
        assert_eq!(seconds.month(), 11);
        assert_eq!(seconds.day(), 14);

        let fractional = from_epoch(1.5).unwrap();
        assert_eq!(fractional.timestamp_millis(), 1500);
    }

    #[test]
    fn test_epoch_rejects_out_of_range() {
        assert!(from_epoch(f64::NAN).is_none());
        assert!(from_epoch(f64::MAX).is_none());
    }

    #[derive(Debug, serde::Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "deserialize_optional")]
        at: Option<Timestamp>,
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let numeric: Stamped = serde_json::from_value(serde_json::json!({"at": 1_700_000_000})).unwrap();
        let text: Stamped =
            serde_json::from_value(serde_json::json!({"at": "2023-11-14T22:13:20Z"})).unwrap();
        assert_eq!(numeric.at, text.at);
        assert!(numeric.at.is_some());

        let missing: Stamped = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(missing.at.is_none());
        let null: Stamped = serde_json::from_value(serde_json::json!({"at": null})).unwrap();
        assert!(null.at.is_none());

        assert!(serde_json::from_value::<Stamped>(serde_json::json!({"at": true})).is_err());
    }
}
