//! WeatherController driven end to end with scripted capabilities

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use skycast_core::geo::{FixedGeolocator, NoGeolocator};
use skycast_core::reducer::LOCATION_NOT_FOUND;
use skycast_core::{
    Action, ApiError, AppState, Condition, Coordinates, ForecastEntry, Geolocator, Phase,
    UnitMode, WeatherApi, WeatherController, WeatherSnapshot,
};

const HERE: Coordinates = Coordinates {
    lat: 50.45,
    lon: 30.52,
};

/// Answers from a fixed gazetteer and records every call
#[derive(Default)]
struct ScriptedApi {
    /// query, resolved name, position
    cities: Vec<(&'static str, &'static str, Coordinates)>,
    slow_city: Option<&'static str>,
    forecast_fails: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    fn with_cities() -> Self {
        Self {
            cities: vec![
                ("London", "London", Coordinates { lat: 51.51, lon: -0.13 }),
                ("Paris", "Paris", Coordinates { lat: 48.85, lon: 2.35 }),
                ("Paris, US", "Paris", Coordinates { lat: 33.66, lon: -95.55 }),
                ("Slowtown", "Slowtown", Coordinates { lat: 10.0, lon: 10.0 }),
            ],
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn snapshot(name: &str, coords: Coordinates, unit: UnitMode) -> WeatherSnapshot {
        let temperature = match unit {
            UnitMode::Metric => 20.0,
            UnitMode::Imperial => 68.0,
        };
        WeatherSnapshot {
            name: name.to_string(),
            coords,
            temperature,
            feels_like: temperature,
            humidity: 55,
            wind_speed_mps: 5.0,
            condition: Condition::Clear,
            unit,
        }
    }
}

#[async_trait]
impl WeatherApi for ScriptedApi {
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: UnitMode,
    ) -> Result<WeatherSnapshot, ApiError> {
        self.record(format!("coords {} {}", coords, unit));
        Ok(Self::snapshot("Here", coords, unit))
    }

    async fn current_by_city(
        &self,
        name: &str,
        unit: UnitMode,
    ) -> Result<WeatherSnapshot, ApiError> {
        self.record(format!("city {} {}", name, unit));
        if self.slow_city.is_some_and(|slow| slow.eq_ignore_ascii_case(name)) {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        self.cities
            .iter()
            .find(|(query, _, _)| query.eq_ignore_ascii_case(name))
            .map(|(_, resolved, coords)| Self::snapshot(resolved, *coords, unit))
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }

    async fn daily_forecast(
        &self,
        coords: Coordinates,
        unit: UnitMode,
    ) -> Result<Vec<ForecastEntry>, ApiError> {
        self.record(format!("forecast {} {}", coords, unit));
        if self.forecast_fails {
            return Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            });
        }
        let offset = FixedOffset::east_opt(0).unwrap();
        Ok((0..8)
            .map(|i| ForecastEntry {
                time: DateTime::from_timestamp(1_700_000_000 + i * 86_400, 0).unwrap(),
                utc_offset: offset,
                temp_max: 15.0,
                temp_min: 5.0,
                icon: "01d".into(),
                description: "clear sky".into(),
            })
            .collect())
    }
}

fn controller(api: Arc<ScriptedApi>, geo: Arc<dyn Geolocator>) -> WeatherController {
    WeatherController::new(AppState::default(), api, geo)
}

async fn settle(controller: &mut WeatherController) {
    tokio::time::timeout(Duration::from_secs(5), controller.settle())
        .await
        .expect("controller did not settle");
}

async fn search(controller: &mut WeatherController, city: &str) {
    controller.dispatch(Action::SearchFocus);
    for c in city.chars() {
        controller.dispatch(Action::SearchInput(c));
    }
    controller.dispatch(Action::SearchSubmit);
    settle(controller).await;
}

#[tokio::test]
async fn startup_with_geolocation_shows_local_weather() {
    let api = Arc::new(ScriptedApi::with_cities());
    let mut controller = controller(api.clone(), Arc::new(FixedGeolocator(HERE)));

    controller.dispatch(Action::AppInit);
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.phase, Phase::Ready);
    assert!(!state.is_loading);
    assert_eq!(state.location_name(), Some("Here"));
    assert_eq!(state.forecast.len(), 8);
    assert!(!state.searched_city);

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().any(|c| c.starts_with("coords")));
    assert!(calls.iter().any(|c| c.starts_with("forecast")));
}

#[tokio::test]
async fn startup_without_geolocation_falls_back_once() {
    let api = Arc::new(ScriptedApi::with_cities());
    let mut controller = controller(api.clone(), Arc::new(NoGeolocator));

    controller.dispatch(Action::AppInit);
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.location_name(), Some("London"));
    assert!(!state.searched_city);
    assert_eq!(state.active_coords, Some(Coordinates { lat: 51.51, lon: -0.13 }));

    let city_calls = api.calls().iter().filter(|c| c.starts_with("city")).count();
    assert_eq!(city_calls, 1);
}

#[tokio::test]
async fn search_then_toggle_refetches_city_in_new_unit() {
    let api = Arc::new(ScriptedApi::with_cities());
    let mut controller = controller(api.clone(), Arc::new(FixedGeolocator(HERE)));
    controller.dispatch(Action::AppInit);
    settle(&mut controller).await;

    search(&mut controller, "paris").await;
    assert!(controller.state().searched_city);
    assert_eq!(controller.state().location_name(), Some("Paris"));
    assert!(api.calls().contains(&"forecast 48.85°N, 2.35°E metric".to_string()));

    controller.dispatch(Action::UnitToggle);
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.unit, UnitMode::Imperial);
    assert_eq!(state.forecast_unit, UnitMode::Imperial);
    let snapshot = state.snapshot.as_ref().unwrap();
    assert_eq!(snapshot.unit, UnitMode::Imperial);
    assert_eq!(snapshot.wind(state.unit).to_string(), "11 mph");
    assert!(api.calls().contains(&"city paris imperial".to_string()));
}

#[tokio::test]
async fn failed_search_keeps_current_location() {
    let api = Arc::new(ScriptedApi::with_cities());
    let mut controller = controller(api.clone(), Arc::new(FixedGeolocator(HERE)));
    controller.dispatch(Action::AppInit);
    settle(&mut controller).await;
    let before = controller.state().snapshot.clone();

    search(&mut controller, "Atlantis").await;

    let state = controller.state();
    assert_eq!(state.alert.as_deref(), Some(LOCATION_NOT_FOUND));
    assert!(!state.searched_city);
    assert_eq!(state.snapshot, before);
    assert_eq!(state.phase, Phase::Ready);
    assert!(!state.is_loading);
    assert!(state.search_query.is_empty());
}

#[tokio::test]
async fn latest_search_wins_over_slow_one() {
    let api = Arc::new(ScriptedApi {
        slow_city: Some("Slowtown"),
        ..ScriptedApi::with_cities()
    });
    let mut controller = controller(api.clone(), Arc::new(NoGeolocator));

    for city in ["Slowtown", "Paris"] {
        for c in city.chars() {
            controller.dispatch(Action::SearchInput(c));
        }
        controller.dispatch(Action::SearchSubmit);
    }
    settle(&mut controller).await;
    // give the superseded request time to (not) arrive
    tokio::time::sleep(Duration::from_millis(400)).await;
    while let Ok(Some(action)) =
        tokio::time::timeout(Duration::from_millis(10), controller.next_action()).await
    {
        controller.dispatch(action);
    }

    assert_eq!(controller.state().location_name(), Some("Paris"));
    assert_eq!(controller.state().last_city.as_deref(), Some("Paris"));
}

#[tokio::test]
async fn forecast_failure_leaves_current_conditions() {
    let api = Arc::new(ScriptedApi {
        forecast_fails: true,
        ..ScriptedApi::with_cities()
    });
    let mut controller = controller(api, Arc::new(FixedGeolocator(HERE)));

    controller.dispatch(Action::AppInit);
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.phase, Phase::Ready);
    assert!(!state.is_loading);
    assert!(state.snapshot.is_some());
    assert!(state.forecast.is_empty());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn toggle_after_qualified_search_stays_put() {
    let api = Arc::new(ScriptedApi::with_cities());
    let mut controller = controller(api.clone(), Arc::new(NoGeolocator));

    search(&mut controller, "Paris, US").await;
    let texas = Coordinates { lat: 33.66, lon: -95.55 };
    assert_eq!(controller.state().location_name(), Some("Paris"));
    assert_eq!(controller.state().active_coords, Some(texas));

    controller.dispatch(Action::UnitToggle);
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.active_coords, Some(texas));
    assert_eq!(state.snapshot.as_ref().map(|s| s.coords), Some(texas));
    assert!(api.calls().contains(&"city Paris, US imperial".to_string()));
    assert!(api.calls().contains(&"forecast 33.66°N, 95.55°W imperial".to_string()));
}

#[tokio::test]
async fn failed_search_after_toggle_still_applies_new_unit() {
    let api = Arc::new(ScriptedApi::with_cities());
    let mut controller = controller(api.clone(), Arc::new(NoGeolocator));

    search(&mut controller, "Paris").await;
    assert_eq!(controller.state().snapshot.as_ref().map(|s| s.unit), Some(UnitMode::Metric));

    // search submitted before the imperial re-fetch answered
    controller.dispatch(Action::UnitToggle);
    search(&mut controller, "Atlantis").await;

    let state = controller.state();
    assert_eq!(state.alert.as_deref(), Some(LOCATION_NOT_FOUND));
    assert_eq!(state.unit, UnitMode::Imperial);
    assert_eq!(state.snapshot.as_ref().map(|s| s.unit), Some(UnitMode::Imperial));
    assert_eq!(state.forecast_unit, UnitMode::Imperial);
    assert_eq!(state.location_name(), Some("Paris"));
    assert_eq!(state.phase, Phase::Ready);
    assert!(!state.is_loading);
}
