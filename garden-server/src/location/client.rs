//! IP geolocation HTTP client (ipapi.co response shape).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::GardenConfig;
use crate::error::LookupError;
use crate::http;

use super::types::Location;

/// The subset of the ipapi.co response we use.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: f64,
    longitude: f64,
    city: String,
    country_name: String,
    timezone: String,
}

impl IpApiResponse {
    fn into_location(self, fetched_at: DateTime<Utc>) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city,
            country: self.country_name,
            timezone: self.timezone,
            last_updated: Some(fetched_at),
        }
    }
}

/// Client for the IP geolocation endpoint.
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: reqwest::Client,
    url: String,
}

impl LocationClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &GardenConfig) -> Result<Self, LookupError> {
        Ok(Self {
            http: http::build_client(config.timeout_secs)?,
            url: config.location_api_url.clone(),
        })
    }

    /// Look up the caller's location, stamped with the current time.
    pub async fn fetch(&self) -> Result<Location, LookupError> {
        debug!(url = %self.url, "requesting IP geolocation");
        let response: IpApiResponse = http::get_json(self.http.get(&self.url)).await?;
        Ok(response.into_location(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ipapi_response() {
        let body = r#"{
            "ip": "203.0.113.7",
            "city": "Lyon",
            "region": "Auvergne-Rhone-Alpes",
            "country_name": "France",
            "country_code": "FR",
            "latitude": 45.7485,
            "longitude": 4.8467,
            "timezone": "Europe/Paris",
            "utc_offset": "+0100"
        }"#;

        let response: IpApiResponse = serde_json::from_str(body).unwrap();
        let now = Utc::now();
        let location = response.into_location(now);

        assert_eq!(location.city, "Lyon");
        assert_eq!(location.country, "France");
        assert_eq!(location.timezone, "Europe/Paris");
        assert_eq!(location.latitude, 45.7485);
        assert_eq!(location.last_updated, Some(now));
    }

    #[test]
    fn rate_limit_body_is_missing_fields() {
        let body = r#"{"error": true, "reason": "RateLimited"}"#;
        let err = serde_json::from_str::<IpApiResponse>(body).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn uses_configured_url() {
        let config = GardenConfig::default().with_location_api_url("http://localhost:1234/json/");
        let client = LocationClient::new(&config).unwrap();
        assert_eq!(client.url, "http://localhost:1234/json/");
    }
}
