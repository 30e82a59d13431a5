//! OpenWeatherMap wire models

use serde::Deserialize;

/// `/data/2.5/weather` response
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    pub name: String,
    pub coord: Coord,
    pub main: MainBlock,
    pub wind: WindBlock,
    #[serde(default)]
    pub weather: Vec<WeatherBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindBlock {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherBlock {
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// One Call response restricted to `daily`
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub timezone_offset: i32,
    #[serde(default)]
    pub daily: Vec<DailyItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyItem {
    pub dt: i64,
    pub temp: DailyTemp,
    #[serde(default)]
    pub weather: Vec<WeatherBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyTemp {
    pub max: f64,
    pub min: f64,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
