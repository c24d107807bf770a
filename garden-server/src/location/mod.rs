//! IP-based location resolution.
//!
//! Resolves the caller's approximate position from an IP geolocation
//! service, holding the result for the cache TTL and mirroring it to
//! `location_cache.json`.

mod client;
mod resolver;
mod types;

pub use client::LocationClient;
pub use resolver::{LOCATION_CACHE_FILE, LocationResolver};
pub use types::Location;
