//! Location resolver: cached IP geolocation.

use tracing::info;

use crate::config::GardenConfig;
use crate::error::ResolverError;
use crate::freshness::{FreshnessCache, RecordStore};

use super::client::LocationClient;
use super::types::Location;

/// File name of the persisted location record.
pub const LOCATION_CACHE_FILE: &str = "location_cache.json";

/// Resolves and caches the caller's location.
///
/// Unresolved until a fresh record is loaded or a fetch succeeds; a failed
/// fetch never clears a previously resolved location.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: LocationClient,
    cache: FreshnessCache<Location>,
}

impl LocationResolver {
    /// Create a resolver, adopting a fresh persisted record if one exists.
    ///
    /// Fails with [`ResolverError::Cache`] if the record cannot be read.
    pub fn new(config: &GardenConfig) -> Result<Self, ResolverError> {
        let client = LocationClient::new(config).map_err(ResolverError::LocationLookupFailed)?;
        let store = RecordStore::new(config.cache_path(LOCATION_CACHE_FILE));

        let cache = FreshnessCache::open(store, config.cache_ttl())?;

        Ok(Self { client, cache })
    }

    /// Get the location, fetching only if the held one is missing or stale.
    pub async fn get_location(&self) -> Result<Location, ResolverError> {
        self.cache
            .get_or_fetch(|| self.lookup())
            .await
            .map_err(ResolverError::LocationLookupFailed)
    }

    /// Fetch the location from the provider, replacing the held one.
    pub async fn fetch_location(&self) -> Result<Location, ResolverError> {
        self.cache
            .refresh(|| self.lookup())
            .await
            .map_err(ResolverError::LocationLookupFailed)
    }

    /// The held location, if any, regardless of age.
    pub async fn current(&self) -> Option<Location> {
        self.cache.held().await
    }

    async fn lookup(&self) -> Result<Location, crate::error::LookupError> {
        let location = self.client.fetch().await?;
        info!(
            city = %location.city,
            country = %location.country,
            "resolved location"
        );
        Ok(location)
    }
}
