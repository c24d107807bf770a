//! Garden watering rules.

use std::fmt;

use serde::Serialize;

use super::types::WeatherSnapshot;

/// Rainfall over the last hour (mm) above which watering is skipped.
const RAINFALL_THRESHOLD_MM: f64 = 5.0;

/// Relative humidity (%) above which watering is skipped.
const HUMIDITY_THRESHOLD_PCT: f64 = 80.0;

/// Temperature above which watering is called for, in provider units.
const HEAT_THRESHOLD: f64 = 30.0;

/// Why a watering decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WateringReason {
    RecentRainfall,
    HighHumidity,
    HighTemperature,
    Regular,
}

impl WateringReason {
    /// Human-readable explanation.
    pub fn description(&self) -> &'static str {
        match self {
            Self::RecentRainfall => "recent rainfall sufficient",
            Self::HighHumidity => "high humidity",
            Self::HighTemperature => "high temperature requires watering",
            Self::Regular => "regular watering recommended",
        }
    }
}

impl fmt::Display for WateringReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Whether to water the garden, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WateringDecision {
    pub should_water: bool,
    pub reason: WateringReason,
}

impl WateringDecision {
    /// Apply the watering rules in order; the first match wins.
    pub fn evaluate(weather: &WeatherSnapshot) -> Self {
        let (should_water, reason) = if weather.precipitation > RAINFALL_THRESHOLD_MM {
            (false, WateringReason::RecentRainfall)
        } else if weather.humidity > HUMIDITY_THRESHOLD_PCT {
            (false, WateringReason::HighHumidity)
        } else if weather.temperature > HEAT_THRESHOLD {
            (true, WateringReason::HighTemperature)
        } else {
            (true, WateringReason::Regular)
        };

        Self {
            should_water,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(precipitation: f64, humidity: f64, temperature: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature,
            humidity,
            precipitation,
            wind_speed: 2.0,
            cloud_cover: 20.0,
            last_updated: None,
        }
    }

    #[test]
    fn rainfall_beats_humidity() {
        let decision = WateringDecision::evaluate(&weather(6.0, 90.0, 20.0));
        assert!(!decision.should_water);
        assert_eq!(decision.reason, WateringReason::RecentRainfall);
        assert_eq!(decision.reason.to_string(), "recent rainfall sufficient");
    }

    #[test]
    fn humidity_beats_heat() {
        let decision = WateringDecision::evaluate(&weather(0.0, 85.0, 35.0));
        assert!(!decision.should_water);
        assert_eq!(decision.reason, WateringReason::HighHumidity);
        assert_eq!(decision.reason.to_string(), "high humidity");
    }

    #[test]
    fn heat_calls_for_watering() {
        let decision = WateringDecision::evaluate(&weather(0.0, 40.0, 32.0));
        assert!(decision.should_water);
        assert_eq!(decision.reason, WateringReason::HighTemperature);
        assert_eq!(
            decision.reason.to_string(),
            "high temperature requires watering"
        );
    }

    #[test]
    fn falls_back_to_regular_watering() {
        let decision = WateringDecision::evaluate(&weather(0.0, 50.0, 20.0));
        assert!(decision.should_water);
        assert_eq!(decision.reason, WateringReason::Regular);
        assert_eq!(decision.reason.to_string(), "regular watering recommended");
    }

    #[test]
    fn thresholds_are_exclusive() {
        let decision = WateringDecision::evaluate(&weather(5.0, 80.0, 30.0));
        assert_eq!(decision.reason, WateringReason::Regular);
    }

    #[test]
    fn reason_serializes_as_snake_case() {
        let json = serde_json::to_value(WateringReason::RecentRainfall).unwrap();
        assert_eq!(json, "recent_rainfall");
    }
}
