//! Configuration
//!
//! Layered: built-in defaults, then the TOML file, then command-line (and
//! environment, which clap folds into the command line) overrides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::api::openweather::{DEFAULT_BASE_URL, DEFAULT_FORECAST_PATH};
use crate::api::OpenWeatherConfig;
use crate::location::{Coordinates, InvalidCoordinates};
use crate::state::DEFAULT_CITY;
use crate::units::UnitMode;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no OpenWeatherMap API key: set OPENWEATHER_API_KEY, pass --api-key or add api_key to the config file")]
    MissingApiKey,

    #[error("default city must not be empty")]
    EmptyDefaultCity,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("unknown geolocation mode {0:?} (expected \"ip\", \"off\" or {{ lat, lon }})")]
    UnknownGeolocation(String),

    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),
}

/// Where the user's position comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "GeolocationRepr")]
pub enum GeolocationMode {
    /// IP-based lookup
    #[default]
    Ip,
    /// Always unavailable; the default city is shown
    Off,
    Fixed(Coordinates),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GeolocationRepr {
    Named(String),
    Fixed(Coordinates),
}

impl TryFrom<GeolocationRepr> for GeolocationMode {
    type Error = ConfigError;

    fn try_from(repr: GeolocationRepr) -> Result<Self, Self::Error> {
        match repr {
            GeolocationRepr::Named(name) => match name.to_ascii_lowercase().as_str() {
                "ip" => Ok(GeolocationMode::Ip),
                "off" | "none" => Ok(GeolocationMode::Off),
                _ => Err(ConfigError::UnknownGeolocation(name)),
            },
            GeolocationRepr::Fixed(coords) => {
                Ok(GeolocationMode::Fixed(Coordinates::new(coords.lat, coords.lon)?))
            }
        }
    }
}

/// The config file as written; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub forecast_path: Option<String>,
    pub default_city: Option<String>,
    pub units: Option<UnitMode>,
    pub geolocation: Option<GeolocationMode>,
    pub refresh_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Command-line overrides
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub units: Option<UnitMode>,
    pub default_city: Option<String>,
    pub geolocation: Option<GeolocationMode>,
    pub refresh_interval_secs: Option<u64>,
}

/// Resolved configuration
#[derive(Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub forecast_path: String,
    pub default_city: String,
    pub units: UnitMode,
    pub geolocation: GeolocationMode,
    /// `None` disables auto-refresh
    pub refresh_interval: Option<Duration>,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("forecast_path", &self.forecast_path)
            .field("default_city", &self.default_city)
            .field("units", &self.units)
            .field("geolocation", &self.geolocation)
            .field("refresh_interval", &self.refresh_interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/skycast/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Load from `path` (must exist) or the default path (may be missing),
    /// then apply overrides.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(read_file(path)?),
            None => match Self::default_path() {
                Some(path) if path.exists() => Some(read_file(&path)?),
                _ => None,
            },
        };
        Self::resolve(file.unwrap_or_default(), overrides)
    }

    /// Merge file values and overrides over the defaults and validate
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let api_key = overrides
            .api_key
            .or(file.api_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let refresh_secs = overrides
            .refresh_interval_secs
            .or(file.refresh_interval_secs)
            .unwrap_or(0);

        let config = Self {
            api_key,
            base_url: file.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            forecast_path: file
                .forecast_path
                .unwrap_or_else(|| DEFAULT_FORECAST_PATH.to_string()),
            default_city: overrides
                .default_city
                .or(file.default_city)
                .unwrap_or_else(|| DEFAULT_CITY.to_string())
                .trim()
                .to_string(),
            units: overrides.units.or(file.units).unwrap_or_default(),
            geolocation: overrides.geolocation.or(file.geolocation).unwrap_or_default(),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.default_city.is_empty() {
            return Err(ConfigError::EmptyDefaultCity);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if let GeolocationMode::Fixed(coords) = self.geolocation {
            Coordinates::new(coords.lat, coords.lon)?;
        }
        Ok(())
    }

    pub fn openweather(&self) -> OpenWeatherConfig {
        OpenWeatherConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            forecast_path: self.forecast_path.clone(),
            timeout: self.timeout,
        }
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    debug!(path = %path.display(), "reading config file");
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    FileConfig::parse(&text, path)
}
