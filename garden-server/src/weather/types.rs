//! Weather snapshot entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::freshness::{FlatRecord, Timestamped, iso_timestamp};

/// Current conditions at a location, in the configured provider units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,

    /// Relative humidity, percent
    pub humidity: f64,

    /// Rainfall over the last hour, mm
    #[serde(default)]
    pub precipitation: f64,

    pub wind_speed: f64,

    /// Cloud cover, percent
    pub cloud_cover: f64,

    /// When this snapshot was fetched from the provider
    #[serde(default, with = "iso_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl FlatRecord for WeatherSnapshot {}

impl Timestamped for WeatherSnapshot {
    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::Record;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn record_round_trip() {
        let original = record(json!({
            "temperature": 22.5,
            "humidity": 64.0,
            "precipitation": 0.25,
            "wind_speed": 3.6,
            "cloud_cover": 40.0,
            "last_updated": "2024-06-01T08:30:00.250Z"
        }));

        let snapshot = WeatherSnapshot::from_record(original.clone()).unwrap();
        assert_eq!(snapshot.precipitation, 0.25);

        assert_eq!(snapshot.to_record().unwrap(), original);
    }

    #[test]
    fn record_round_trip_without_timestamp() {
        let original = record(json!({
            "temperature": -4.0,
            "humidity": 91.0,
            "precipitation": 0.0,
            "wind_speed": 7.2,
            "cloud_cover": 100.0,
            "last_updated": null
        }));

        let snapshot = WeatherSnapshot::from_record(original.clone()).unwrap();
        assert_eq!(snapshot.to_record().unwrap(), original);
    }

    #[test]
    fn naive_timestamp_from_older_records_is_accepted() {
        let snapshot = WeatherSnapshot::from_record(record(json!({
            "temperature": 18.0,
            "humidity": 50.0,
            "precipitation": 0.0,
            "wind_speed": 1.0,
            "cloud_cover": 0.0,
            "last_updated": "2024-06-01T08:30:00.123456"
        })))
        .unwrap();

        assert!(snapshot.last_updated.is_some());
    }

    #[test]
    fn older_records_are_normalized_on_rewrite() {
        let legacy = record(json!({
            "temperature": 18.5,
            "humidity": 82,
            "precipitation": 0,
            "wind_speed": 1.0,
            "cloud_cover": 75,
            "last_updated": "2024-06-01T08:30:00"
        }));

        let snapshot = WeatherSnapshot::from_record(legacy.clone()).unwrap();
        assert_eq!(snapshot.humidity, 82.0);
        assert_eq!(snapshot.cloud_cover, 75.0);

        // Integers come back as floats, naive timestamps as RFC 3339 UTC.
        let rewritten = snapshot.to_record().unwrap();
        assert_ne!(rewritten, legacy);
        assert_eq!(rewritten["humidity"], json!(82.0));
        assert_eq!(rewritten["precipitation"], json!(0.0));
        assert!(rewritten["last_updated"].as_str().unwrap().ends_with('Z'));

        let reread = WeatherSnapshot::from_record(rewritten.clone()).unwrap();
        assert_eq!(reread, snapshot);
        assert_eq!(reread.to_record().unwrap(), rewritten);
    }
}
