//! Freshness-backed fetching.
//!
//! A [`FreshnessCache`] holds the last fetched value in memory and mirrors it
//! to a flat JSON record on disk. A value is served without a network round
//! trip only while it is younger than the configured TTL; otherwise the
//! caller-supplied fetch runs and its result replaces the held value.

mod record;
mod store;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub use record::{FlatRecord, Record, format_timestamp, iso_timestamp, parse_timestamp};
pub use store::{CacheError, RecordStore};

/// Default TTL: 30 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(1800);

/// An entity stamped with the moment it was fetched.
pub trait Timestamped {
    fn last_updated(&self) -> Option<DateTime<Utc>>;
}

/// Check whether a value stamped at `timestamp` is still within `ttl`.
///
/// Absent timestamps are never fresh.
pub fn is_fresh(timestamp: Option<DateTime<Utc>>, ttl: Duration) -> bool {
    is_fresh_at(timestamp, ttl, Utc::now())
}

/// Same as [`is_fresh`], measured against an explicit `now`.
pub fn is_fresh_at(timestamp: Option<DateTime<Utc>>, ttl: Duration, now: DateTime<Utc>) -> bool {
    let Some(timestamp) = timestamp else {
        return false;
    };
    let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
    now - timestamp < ttl
}

/// In-memory holder plus persisted record, validated by age.
///
/// Cloning shares the held value.
#[derive(Debug, Clone)]
pub struct FreshnessCache<T> {
    held: Arc<RwLock<Option<T>>>,
    store: RecordStore,
    ttl: Duration,
}

impl<T> FreshnessCache<T>
where
    T: FlatRecord + Timestamped + Clone,
{
    /// Open a cache, adopting the persisted record if it is still fresh.
    ///
    /// Missing, corrupt and stale records leave the cache empty. Any other
    /// failure to read the record file is returned as [`CacheError::Io`].
    pub fn open(store: RecordStore, ttl: Duration) -> Result<Self, CacheError> {
        let held = match load_entity::<T>(&store) {
            Ok(Some(value)) if is_fresh(value.last_updated(), ttl) => {
                debug!(path = %store.path().display(), "loaded fresh cache record");
                Some(value)
            }
            Ok(Some(_)) => {
                debug!(path = %store.path().display(), "ignoring stale cache record");
                None
            }
            Ok(None) => None,
            Err(e @ CacheError::Corrupt { .. }) => {
                warn!(error = %e, "ignoring corrupt cache record");
                None
            }
            Err(e @ CacheError::Io { .. }) => return Err(e),
        };

        Ok(Self {
            held: Arc::new(RwLock::new(held)),
            store,
            ttl,
        })
    }

    /// The held value, if it is still fresh.
    pub async fn fresh(&self) -> Option<T> {
        let guard = self.held.read().await;
        guard
            .as_ref()
            .filter(|value| is_fresh(value.last_updated(), self.ttl))
            .cloned()
    }

    /// The held value regardless of age.
    pub async fn held(&self) -> Option<T> {
        let guard = self.held.read().await;
        guard.clone()
    }

    /// Serve the held value if fresh, otherwise fetch a new one.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.fresh().await {
            debug!(path = %self.store.path().display(), "serving cached value");
            return Ok(value);
        }

        self.refresh(fetch).await
    }

    /// Fetch unconditionally, then hold and persist the result.
    ///
    /// On failure the held value is left exactly as it was.
    pub async fn refresh<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let value = fetch().await?;

        {
            let mut guard = self.held.write().await;
            *guard = Some(value.clone());
        }

        if let Err(e) = self.persist(&value) {
            warn!(error = %e, "failed to persist fetched value");
        }

        Ok(value)
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the backing record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn persist(&self, value: &T) -> Result<(), CacheError> {
        let record = value.to_record().map_err(|e| CacheError::Corrupt {
            path: self.store.path().to_path_buf(),
            message: format!("failed to build record: {e}"),
        })?;
        self.store.save(&record)
    }
}

fn load_entity<T: FlatRecord>(store: &RecordStore) -> Result<Option<T>, CacheError> {
    let Some(record) = store.load()? else {
        return Ok(None);
    };

    T::from_record(record)
        .map(Some)
        .map_err(|e| CacheError::Corrupt {
            path: store.path().to_path_buf(),
            message: e.to_string(),
        })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Fresh iff strictly younger than the TTL.
        #[test]
        fn fresh_iff_younger_than_ttl(ttl_secs in 1u64..100_000, age_secs in -1_000i64..200_000) {
            let now = Utc::now();
            let ts = now - TimeDelta::seconds(age_secs);
            let fresh = is_fresh_at(Some(ts), Duration::from_secs(ttl_secs), now);
            prop_assert_eq!(fresh, age_secs < ttl_secs as i64);
        }
    }
}
