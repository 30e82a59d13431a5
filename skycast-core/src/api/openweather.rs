//! OpenWeatherMap HTTP client

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::models::{CurrentResponse, ErrorBody, ForecastResponse};
use super::{ApiError, WeatherApi};
use crate::location::Coordinates;
use crate::units::{wind_to_mps, UnitMode};
use crate::weather::{Condition, ForecastEntry, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_FORECAST_PATH: &str = "/data/3.0/onecall";
const CURRENT_PATH: &str = "/data/2.5/weather";

/// Connection settings for [`OpenWeatherClient`]
#[derive(Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub forecast_path: String,
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            forecast_path: DEFAULT_FORECAST_PATH.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl std::fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("forecast_path", &self.forecast_path)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
        subject: &str,
    ) -> Result<T, ApiError> {
        params.push(("appid", self.config.api_key.clone()));

        let response = self
            .client
            .get(self.url(path))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), path, "weather service responded");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(match status {
                StatusCode::NOT_FOUND => ApiError::NotFound(subject.to_string()),
                StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
                StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
                _ => ApiError::Status {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn snapshot(data: CurrentResponse, unit: UnitMode) -> Result<WeatherSnapshot, ApiError> {
        let coords = Coordinates::new(data.coord.lat, data.coord.lon)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let condition = data
            .weather
            .first()
            .map(|w| Condition::from_main(&w.main))
            .ok_or_else(|| ApiError::Parse("missing weather condition".into()))?;

        Ok(WeatherSnapshot {
            name: data.name,
            coords,
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            humidity: data.main.humidity.round().clamp(0.0, 100.0) as u8,
            wind_speed_mps: wind_to_mps(data.wind.speed, unit),
            condition,
            unit,
        })
    }

    fn forecast(data: ForecastResponse) -> Result<Vec<ForecastEntry>, ApiError> {
        let utc_offset = FixedOffset::east_opt(data.timezone_offset).ok_or_else(|| {
            ApiError::Parse(format!("invalid timezone offset {}", data.timezone_offset))
        })?;

        data.daily
            .into_iter()
            .map(|day| {
                let time = DateTime::from_timestamp(day.dt, 0)
                    .ok_or_else(|| ApiError::Parse(format!("invalid timestamp {}", day.dt)))?;
                let (icon, description) = day
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| (w.icon, w.description))
                    .unwrap_or_default();
                Ok(ForecastEntry {
                    time,
                    utc_offset,
                    temp_max: day.temp.max,
                    temp_min: day.temp.min,
                    icon,
                    description,
                })
            })
            .collect()
    }
}

fn coord_params(coords: Coordinates, unit: UnitMode) -> Vec<(&'static str, String)> {
    vec![
        ("lat", coords.lat.to_string()),
        ("lon", coords.lon.to_string()),
        ("units", unit.api_param().to_string()),
    ]
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    #[instrument(skip(self, coords), fields(coords = %coords))]
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: UnitMode,
    ) -> Result<WeatherSnapshot, ApiError> {
        let data: CurrentResponse = self
            .get_json(CURRENT_PATH, coord_params(coords, unit), &coords.to_string())
            .await?;
        Self::snapshot(data, unit)
    }

    #[instrument(skip(self))]
    async fn current_by_city(
        &self,
        name: &str,
        unit: UnitMode,
    ) -> Result<WeatherSnapshot, ApiError> {
        let params = vec![
            ("q", name.to_string()),
            ("units", unit.api_param().to_string()),
        ];
        let data: CurrentResponse = self.get_json(CURRENT_PATH, params, name).await?;
        Self::snapshot(data, unit)
    }

    #[instrument(skip(self, coords), fields(coords = %coords))]
    async fn daily_forecast(
        &self,
        coords: Coordinates,
        unit: UnitMode,
    ) -> Result<Vec<ForecastEntry>, ApiError> {
        let mut params = coord_params(coords, unit);
        params.push(("exclude", "current,minutely,hourly,alerts".to_string()));
        let data: ForecastResponse = self
            .get_json(&self.config.forecast_path, params, &coords.to_string())
            .await?;
        Self::forecast(data)
    }
}
