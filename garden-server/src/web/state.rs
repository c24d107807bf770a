//! Application state for the web layer.

use std::sync::Arc;

use crate::config::GardenConfig;
use crate::error::ResolverError;
use crate::location::LocationResolver;
use crate::weather::WeatherResolver;

/// Shared application state.
///
/// Contains the resolvers needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached IP geolocation
    pub location: Arc<LocationResolver>,

    /// Cached weather and watering decision
    pub weather: Arc<WeatherResolver>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(location: LocationResolver, weather: WeatherResolver) -> Self {
        Self {
            location: Arc::new(location),
            weather: Arc::new(weather),
        }
    }

    /// Build both resolvers from configuration.
    pub fn from_config(config: &GardenConfig) -> Result<Self, ResolverError> {
        Ok(Self::new(
            LocationResolver::new(config)?,
            WeatherResolver::new(config)?,
        ))
    }
}
