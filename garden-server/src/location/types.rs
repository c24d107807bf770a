//! Location entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::freshness::{FlatRecord, Timestamped, iso_timestamp};

/// Approximate geographic position of the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
    pub timezone: String,

    /// When this location was fetched from the provider
    #[serde(default, with = "iso_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl FlatRecord for Location {}

impl Timestamped for Location {
    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}
