//! Resolver error types.

use crate::freshness::CacheError;

/// Underlying cause of a failed provider lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON (including missing fields)
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

/// Errors surfaced by the location and weather resolvers.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// IP geolocation lookup failed
    #[error("location lookup failed: {0}")]
    LocationLookupFailed(#[source] LookupError),

    /// Weather provider lookup failed
    #[error("weather lookup failed: {0}")]
    WeatherLookupFailed(#[source] LookupError),

    /// A watering decision was requested before any weather was resolved
    #[error("weather data not available: resolve weather first")]
    WeatherUnavailable,

    /// The persisted record exists but could not be read
    #[error("cache unavailable: {0}")]
    Cache(#[from] CacheError),
}
