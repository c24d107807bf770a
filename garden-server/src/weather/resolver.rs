//! Weather resolver: cached current weather plus the watering decision.

use tracing::info;

use crate::config::GardenConfig;
use crate::error::{LookupError, ResolverError};
use crate::freshness::{FreshnessCache, RecordStore};
use crate::location::Location;

use super::client::WeatherClient;
use super::types::WeatherSnapshot;
use super::watering::WateringDecision;

/// File name of the persisted weather record.
pub const WEATHER_CACHE_FILE: &str = "weather_cache.json";

/// Resolves and caches current weather.
///
/// The held snapshot is not keyed by location: while it is fresh it is
/// served for any location passed to [`get_weather`](Self::get_weather).
#[derive(Debug, Clone)]
pub struct WeatherResolver {
    client: WeatherClient,
    cache: FreshnessCache<WeatherSnapshot>,
}

impl WeatherResolver {
    /// Create a resolver, adopting a fresh persisted record if one exists.
    ///
    /// Fails with [`ResolverError::Cache`] if the record cannot be read.
    pub fn new(config: &GardenConfig) -> Result<Self, ResolverError> {
        let client = WeatherClient::new(config).map_err(ResolverError::WeatherLookupFailed)?;
        let store = RecordStore::new(config.cache_path(WEATHER_CACHE_FILE));

        let cache = FreshnessCache::open(store, config.cache_ttl())?;

        Ok(Self { client, cache })
    }

    /// Get weather at `location`, fetching only if the held snapshot is
    /// missing or stale.
    pub async fn get_weather(&self, location: &Location) -> Result<WeatherSnapshot, ResolverError> {
        self.cache
            .get_or_fetch(|| self.lookup(location))
            .await
            .map_err(ResolverError::WeatherLookupFailed)
    }

    /// Fetch weather at `location` from the provider, replacing the held
    /// snapshot.
    pub async fn fetch_weather(
        &self,
        location: &Location,
    ) -> Result<WeatherSnapshot, ResolverError> {
        self.cache
            .refresh(|| self.lookup(location))
            .await
            .map_err(ResolverError::WeatherLookupFailed)
    }

    /// The held snapshot, if any, regardless of age.
    pub async fn current(&self) -> Option<WeatherSnapshot> {
        self.cache.held().await
    }

    /// Decide whether to water from the held snapshot.
    ///
    /// Never fetches: fails with [`ResolverError::WeatherUnavailable`] until
    /// weather has been resolved at least once.
    pub async fn should_water_garden(&self) -> Result<WateringDecision, ResolverError> {
        let weather = self
            .cache
            .held()
            .await
            .ok_or(ResolverError::WeatherUnavailable)?;
        Ok(WateringDecision::evaluate(&weather))
    }

    async fn lookup(&self, location: &Location) -> Result<WeatherSnapshot, LookupError> {
        let weather = self.client.fetch(location).await?;
        info!(
            city = %location.city,
            temperature = weather.temperature,
            humidity = weather.humidity,
            precipitation = weather.precipitation,
            "resolved weather"
        );
        Ok(weather)
    }
}
