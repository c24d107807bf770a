//! Current weather and the garden watering decision.
//!
//! Weather is fetched from an OpenWeatherMap-shaped endpoint for a resolved
//! [`Location`](crate::location::Location), held for the cache TTL and
//! mirrored to `weather_cache.json`.

mod client;
mod resolver;
mod types;
mod watering;

pub use client::WeatherClient;
pub use resolver::{WEATHER_CACHE_FILE, WeatherResolver};
pub use types::WeatherSnapshot;
pub use watering::{WateringDecision, WateringReason};
