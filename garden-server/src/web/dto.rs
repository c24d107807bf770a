//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::weather::{WateringDecision, WateringReason, WeatherSnapshot};

/// Query accepted by every resolver endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    /// Force a provider round trip instead of serving the held value
    pub refresh: Option<bool>,
}

impl RefreshQuery {
    pub fn forced(&self) -> bool {
        self.refresh.unwrap_or(false)
    }
}

/// Watering recommendation.
#[derive(Debug, Serialize)]
pub struct WateringResponse {
    pub should_water: bool,

    /// Machine-readable reason code
    pub reason_code: WateringReason,

    /// Human-readable reason
    pub reason: String,

    /// The weather the decision was based on
    pub weather: WeatherSnapshot,
}

impl WateringResponse {
    pub fn new(decision: WateringDecision, weather: WeatherSnapshot) -> Self {
        Self {
            should_water: decision.should_water,
            reason_code: decision.reason,
            reason: decision.reason.description().to_string(),
            weather,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
