//! Geolocation capability
//!
//! A terminal has no browser geolocation, so the position comes from an IP
//! lookup, from fixed coordinates in the config, or not at all.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::location::Coordinates;

pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// No geolocation capability configured
    #[error("geolocation unavailable")]
    Unavailable,

    /// The lookup service refused to locate us
    #[error("geolocation denied: {0}")]
    Denied(String),

    #[error("geolocation failed: {0}")]
    Failed(String),
}

/// Source of the user's current position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeoError>;
}

/// Always reports [`GeoError::Unavailable`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocator;

#[async_trait]
impl Geolocator for NoGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        Err(GeoError::Unavailable)
    }
}

/// Reports a fixed position
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Approximate position from the public IP address (ip-api.com format)
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    client: Client,
    url: String,
}

impl IpGeolocator {
    pub fn new(timeout: Duration) -> Result<Self, GeoError> {
        Self::with_url(DEFAULT_IP_LOOKUP_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoError::Failed(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeoError::Failed(e.to_string()))?;

        let data: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| GeoError::Failed(e.to_string()))?;

        if data.status != "success" {
            return Err(GeoError::Denied(
                data.message.unwrap_or_else(|| data.status.clone()),
            ));
        }

        match (data.lat, data.lon) {
            (Some(lat), Some(lon)) => {
                let coords =
                    Coordinates::new(lat, lon).map_err(|e| GeoError::Failed(e.to_string()))?;
                debug!(%coords, "located via IP lookup");
                Ok(coords)
            }
            _ => Err(GeoError::Failed("lookup returned no coordinates".into())),
        }
    }
}
