//! Weather API contract and the OpenWeatherMap implementation
//!
//! The coordinator only depends on [`WeatherApi`]; tests swap in scripted
//! implementations, the binary uses [`OpenWeatherClient`].

mod models;
pub mod openweather;

use async_trait::async_trait;
use thiserror::Error;

use crate::location::Coordinates;
use crate::units::UnitMode;
use crate::weather::{ForecastEntry, WeatherSnapshot};

pub use openweather::{OpenWeatherClient, OpenWeatherConfig};

/// Weather API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested place does not exist
    #[error("location not found: {0}")]
    NotFound(String),

    /// The API key was rejected
    #[error("API key rejected by weather service")]
    Unauthorized,

    #[error("rate limit exceeded")]
    RateLimited,

    /// Non-success HTTP status
    #[error("weather service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport-level failure (DNS, connect, timeout)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Remote weather data source
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Current conditions at the given coordinates
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: UnitMode,
    ) -> Result<WeatherSnapshot, ApiError>;

    /// Current conditions for a free-text place name; the snapshot carries
    /// the resolved coordinates
    async fn current_by_city(
        &self,
        name: &str,
        unit: UnitMode,
    ) -> Result<WeatherSnapshot, ApiError>;

    /// Daily forecast, today first
    async fn daily_forecast(
        &self,
        coords: Coordinates,
        unit: UnitMode,
    ) -> Result<Vec<ForecastEntry>, ApiError>;
}

/// Broad failure class carried by result actions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    NotFound,
    Unauthorized,
    Network,
    Other,
}

/// Cloneable summary of a failed fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == FetchErrorKind::NotFound
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&ApiError> for FetchError {
    fn from(err: &ApiError) -> Self {
        let kind = match err {
            ApiError::NotFound(_) => FetchErrorKind::NotFound,
            ApiError::Unauthorized => FetchErrorKind::Unauthorized,
            ApiError::Request(_) => FetchErrorKind::Network,
            ApiError::RateLimited | ApiError::Status { .. } | ApiError::Parse(_) => {
                FetchErrorKind::Other
            }
        };
        FetchError::new(kind, err.to_string())
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        FetchError::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_from_api_error() {
        let err = FetchError::from(ApiError::NotFound("Atlantis".into()));
        assert!(err.is_not_found());
        assert_eq!(err.message, "location not found: Atlantis");

        let err = FetchError::from(ApiError::Unauthorized);
        assert_eq!(err.kind, FetchErrorKind::Unauthorized);

        let err = FetchError::from(ApiError::Status {
            status: 500,
            message: "oops".into(),
        });
        assert_eq!(err.kind, FetchErrorKind::Other);
        assert_eq!(err.to_string(), "weather service returned 500: oops");
    }
}
