//! Flat key-value records used for persistence.
//!
//! Each cached entity is written as a single JSON object mapping field names
//! to primitives, with `last_updated` as an ISO-8601 string or `null`.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A flat persisted record: field name to primitive value.
pub type Record = Map<String, Value>;

/// Conversion between an entity and its flat record form.
pub trait FlatRecord: Serialize + DeserializeOwned {
    /// Serialize into a flat record.
    fn to_record(&self) -> Result<Record, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Rebuild an entity from a flat record.
    fn from_record(record: Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record))
    }
}

/// Parse a record timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T12:00:00Z`) and naive ISO-8601 without an
/// offset (`2024-01-15T12:00:00.123456`), the latter read as local time.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
        .ok_or_else(|| format!("timestamp {raw:?} does not exist in local time"))
}

/// Format a record timestamp as RFC 3339 UTC.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter for `Option<DateTime<Utc>>` fields stored as ISO-8601 or null.
pub mod iso_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&super::format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| super::parse_timestamp(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-01-15T13:00:00+01:00").unwrap();
        assert_eq!(ts.hour(), 12);
        assert_eq!(ts.day(), 15);
    }

    #[test]
    fn parses_naive_timestamps_as_local_time() {
        let ts = parse_timestamp("2024-01-15T12:00:00.123456").unwrap();
        let local = ts.with_timezone(&Local);
        assert_eq!(local.hour(), 12);
        assert_eq!(local.nanosecond(), 123_456_000);

        assert!(parse_timestamp("2024-01-15T12:00:00").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(err.contains("invalid timestamp"));
    }

    #[test]
    fn formats_as_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15T12:00:00Z");
    }
}
