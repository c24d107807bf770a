//! OpenWeatherMap current-weather HTTP client.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::{GardenConfig, Units};
use crate::error::LookupError;
use crate::http;
use crate::location::Location;

use super::types::WeatherSnapshot;

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// The subset of the current-weather response we use.
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    wind: OwmWind,
    clouds: OwmClouds,
    rain: Option<OwmRain>,
}

impl OwmCurrentResponse {
    fn into_snapshot(self, fetched_at: DateTime<Utc>) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: self.main.temp,
            humidity: self.main.humidity,
            precipitation: self.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
            wind_speed: self.wind.speed,
            cloud_cover: self.clouds.all,
            last_updated: Some(fetched_at),
        }
    }
}

/// Client for the weather endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    units: Units,
}

impl WeatherClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &GardenConfig) -> Result<Self, LookupError> {
        Ok(Self {
            http: http::build_client(config.timeout_secs)?,
            url: config.weather_api_url.clone(),
            api_key: config.api_key.clone(),
            units: config.units,
        })
    }

    /// Fetch current weather at a location, stamped with the current time.
    pub async fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, LookupError> {
        debug!(
            url = %self.url,
            lat = location.latitude,
            lon = location.longitude,
            "requesting current weather"
        );

        let request = self.http.get(&self.url).query(&[
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", self.units.as_str().to_string()),
        ]);

        let response: OwmCurrentResponse = http::get_json(request).await?;
        Ok(response.into_snapshot(Utc::now()))
    }
}
