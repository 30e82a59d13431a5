//! skycast-core: weather fetch coordination for the skycast terminal app
//!
//! The coordinator follows a unidirectional flow:
//!
//! ```text
//! Action -> reducer(&mut AppState) -> DispatchResult<Effect>
//!                                           |
//!             *Did* action  <-  TaskManager (tokio task per stream)
//! ```
//!
//! Geolocation and HTTP access sit behind the [`Geolocator`] and
//! [`WeatherApi`] traits so the whole flow can be driven by tests without a
//! network.

pub mod action;
pub mod api;
pub mod config;
pub mod controller;
pub mod effect;
pub mod geo;
pub mod location;
pub mod reducer;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod tasks;
pub mod units;
pub mod weather;

pub use action::Action;
pub use api::{ApiError, FetchError, FetchErrorKind, OpenWeatherClient, OpenWeatherConfig, WeatherApi};
pub use config::{Config, ConfigError, GeolocationMode, Overrides};
pub use controller::WeatherController;
pub use effect::Effect;
pub use geo::{FixedGeolocator, GeoError, Geolocator, IpGeolocator, NoGeolocator};
pub use location::{Coordinates, LocationQuery};
pub use state::{AppState, Phase, RequestId};
pub use store::{DispatchResult, Store};
pub use subscriptions::Subscriptions;
pub use units::{convert_wind_speed, format_temperature, UnitMode, WindSpeed};
pub use weather::{displayed_forecast, Condition, ForecastEntry, WeatherSnapshot};
