//! Server configuration.
//!
//! Every option has a fixed default; each can be overridden through an
//! environment variable.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default IP geolocation endpoint.
pub const DEFAULT_LOCATION_API_URL: &str = "https://ipapi.co/json/";

/// Default weather endpoint (OpenWeatherMap current weather).
pub const DEFAULT_WEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Default cache TTL: 30 minutes.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 1800;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 8000);

const ENV_API_KEY: &str = "WEATHER_API_KEY";
const ENV_LOCATION_API_URL: &str = "LOCATION_API_URL";
const ENV_WEATHER_API_URL: &str = "WEATHER_API_URL";
const ENV_CACHE_DURATION: &str = "CACHE_DURATION";
const ENV_UNITS: &str = "UNITS";
const ENV_CACHE_DIR: &str = "GARDEN_CACHE_DIR";
const ENV_TIMEOUT: &str = "GARDEN_HTTP_TIMEOUT_SECS";
const ENV_BIND_ADDR: &str = "GARDEN_BIND_ADDR";

/// Unit system requested from the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Celsius, metres per second
    #[default]
    Metric,
    /// Fahrenheit, miles per hour
    Imperial,
    /// Kelvin, metres per second
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(format!(
                "unknown unit system '{s}' (expected metric, imperial or standard)"
            )),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Configuration shared by the resolvers and the server.
#[derive(Debug, Clone)]
pub struct GardenConfig {
    /// Weather provider API key (`appid`)
    pub api_key: String,

    /// IP geolocation endpoint
    pub location_api_url: String,

    /// Weather endpoint
    pub weather_api_url: String,

    /// Maximum age of a cached value, in seconds
    pub cache_ttl_seconds: u64,

    /// Unit system sent to the weather provider
    pub units: Units,

    /// Directory holding the persisted cache records
    pub cache_dir: PathBuf,

    /// Outbound request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,

    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            location_api_url: DEFAULT_LOCATION_API_URL.to_string(),
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECS,
            units: Units::default(),
            cache_dir: PathBuf::from("."),
            timeout_secs: None,
            bind_addr: DEFAULT_BIND_ADDR,
        }
    }
}

impl GardenConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    ///
    /// Unset and blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(key) = get(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(url) = get(ENV_LOCATION_API_URL) {
            config.location_api_url = url;
        }
        if let Some(url) = get(ENV_WEATHER_API_URL) {
            config.weather_api_url = url;
        }
        if let Some(raw) = get(ENV_CACHE_DURATION) {
            config.cache_ttl_seconds = parse_value(ENV_CACHE_DURATION, &raw)?;
        }
        if let Some(raw) = get(ENV_UNITS) {
            config.units = parse_value(ENV_UNITS, &raw)?;
        }
        if let Some(dir) = get(ENV_CACHE_DIR) {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(ENV_TIMEOUT) {
            config.timeout_secs = Some(parse_value(ENV_TIMEOUT, &raw)?);
        }
        if let Some(raw) = get(ENV_BIND_ADDR) {
            config.bind_addr = parse_value(ENV_BIND_ADDR, &raw)?;
        }

        Ok(config)
    }

    /// Set the weather provider API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set a custom IP geolocation endpoint (for testing).
    pub fn with_location_api_url(mut self, url: impl Into<String>) -> Self {
        self.location_api_url = url.into();
        self
    }

    /// Set a custom weather endpoint (for testing).
    pub fn with_weather_api_url(mut self, url: impl Into<String>) -> Self {
        self.weather_api_url = url.into();
        self
    }

    /// Set the cache TTL in seconds.
    pub fn with_cache_ttl_seconds(mut self, secs: u64) -> Self {
        self.cache_ttl_seconds = secs;
        self
    }

    /// Set the unit system.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Set the cache record directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Set the outbound request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Returns the cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Path of a cache record file inside the cache directory.
    pub fn cache_path(&self, file_name: &str) -> PathBuf {
        self.cache_dir.join(file_name)
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: format!("'{raw}': {e}"),
    })
}
