//! Reducer - the weather fetch coordinator
//!
//! `(state, action) -> DispatchResult<Effect>`. All state transitions live
//! here; effects describe the async work to start. Every request gets a
//! fresh [`RequestId`] and only the response to the latest request of each
//! stream (locate, current, forecast) is accepted.

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::api::FetchError;
use crate::effect::Effect;
use crate::location::{Coordinates, LocationQuery};
use crate::state::{
    AppState, FetchOrigin, PendingCurrent, PendingForecast, Phase, RequestId, Resume,
};
use crate::store::DispatchResult;
use crate::units::UnitMode;

pub const LOCATION_NOT_FOUND: &str = "Location not found. Please try again.";

type Outcome = DispatchResult<Effect>;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> Outcome {
    match action {
        // ===== App lifecycle =====
        Action::AppInit => {
            if state.searched_city || state.requests.locate.is_some() {
                return Outcome::unchanged();
            }
            start_locate(state)
        }

        // ===== Geolocation =====
        Action::GeoDidLocate { request, coords } => {
            if !state.requests.take_locate(request) {
                debug!(%request, "discarding stale geolocation result");
                return Outcome::unchanged();
            }
            on_located(state, coords)
        }

        Action::GeoDidFail { request, error } => {
            if !state.requests.take_locate(request) {
                debug!(%request, "discarding stale geolocation failure");
                return Outcome::unchanged();
            }
            warn!(%error, "geolocation failed");
            on_locate_failed(state)
        }

        // ===== Weather =====
        Action::WeatherRefresh => {
            if state.requests.current.is_some() || state.requests.locate.is_some() {
                debug!("refresh skipped: a fetch is already in flight");
                return Outcome::unchanged();
            }
            match (state.searched_city, state.last_city.clone()) {
                (true, Some(city)) => fetch_by_city_name(state, city, FetchOrigin::Refresh),
                _ => start_locate(state),
            }
        }

        Action::WeatherDidLoad { request, snapshot } => {
            let Some(pending) = state.requests.take_current(request) else {
                debug!(%request, "discarding stale weather response");
                return Outcome::unchanged();
            };
            info!(%request, name = %snapshot.name, "current weather loaded");

            state.is_loading = false;
            state.phase = Phase::Ready;
            state.error = None;

            let coords = snapshot.coords;
            let unit = snapshot.unit;
            match pending.origin {
                FetchOrigin::Coordinates => {
                    state.snapshot = Some(snapshot);
                    Outcome::changed()
                }
                FetchOrigin::Search | FetchOrigin::Refresh => {
                    state.searched_city = true;
                    // re-runs use what was typed; the resolved short name
                    // can match a different place
                    state.last_city = match pending.query {
                        LocationQuery::City(query) => Some(query),
                        LocationQuery::Coordinates(_) => Some(snapshot.name.clone()),
                    };
                    // a successful search supersedes geolocation for good
                    state.requests.locate = None;
                    state.snapshot = Some(snapshot);
                    fetch_forecast(state, coords, unit)
                }
                FetchOrigin::Fallback => {
                    state.snapshot = Some(snapshot);
                    fetch_forecast(state, coords, unit)
                }
            }
        }

        Action::WeatherDidError { request, error } => {
            let Some(pending) = state.requests.take_current(request) else {
                debug!(%request, "discarding stale weather error");
                return Outcome::unchanged();
            };

            if pending.origin == FetchOrigin::Search {
                warn!(%request, query = %pending.query, %error, "city search failed");
                state.alert = Some(search_alert(&error));
                return resume(state, pending.resume);
            }

            warn!(%request, query = %pending.query, %error, "current weather fetch failed");
            state.is_loading = false;
            state.phase = Phase::Error;
            state.error = Some(error.message);
            Outcome::changed()
        }

        // ===== Forecast =====
        Action::ForecastDidLoad { request, entries } => {
            let Some(pending) = state.requests.take_forecast(request) else {
                debug!(%request, "discarding stale forecast response");
                return Outcome::unchanged();
            };
            info!(%request, days = entries.len(), "forecast loaded");
            state.forecast = entries;
            state.forecast_unit = pending.unit;
            Outcome::changed()
        }

        Action::ForecastDidError { request, error } => {
            if state.requests.take_forecast(request).is_none() {
                debug!(%request, "discarding stale forecast error");
            } else {
                // previous forecast stays on screen
                warn!(%request, %error, "forecast fetch failed");
            }
            Outcome::unchanged()
        }

        // ===== Search input =====
        Action::SearchFocus => {
            state.search_focused = true;
            true.into()
        }

        Action::SearchBlur => {
            state.search_focused = false;
            state.search_query.clear();
            true.into()
        }

        Action::SearchInput(c) => {
            state.search_query.push(c);
            true.into()
        }

        Action::SearchBackspace => state.search_query.pop().is_some().into(),

        Action::SearchClear => {
            let changed = !state.search_query.is_empty();
            state.search_query.clear();
            changed.into()
        }

        Action::SearchSubmit => {
            // the input is cleared whatever the outcome
            let query = std::mem::take(&mut state.search_query);
            state.search_focused = false;
            let city = query.trim();
            if city.is_empty() {
                return Outcome::changed();
            }
            fetch_by_city_name(state, city.to_string(), FetchOrigin::Search)
        }

        // ===== Units =====
        Action::UnitToggle => {
            let unit = state.unit.toggle();
            toggle_unit(state, unit)
        }

        Action::UnitSet(unit) => toggle_unit(state, unit),

        // ===== UI =====
        Action::AlertDismiss => state.alert.take().is_some().into(),

        Action::ClockTick(now) => {
            state.clock = Some(now);
            Outcome::changed()
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // only re-render if loading (for spinner animation)
            state.is_loading.into()
        }

        // Quit is handled by the runtime loop
        Action::Quit => Outcome::unchanged(),
    }
}

impl From<bool> for DispatchResult<Effect> {
    fn from(changed: bool) -> Self {
        if changed {
            Self::changed()
        } else {
            Self::unchanged()
        }
    }
}

fn start_locate(state: &mut AppState) -> Outcome {
    let request = state.requests.issue();
    state.requests.locate = Some(request);
    state.phase = Phase::LocatingUser;
    state.is_loading = true;
    state.error = None;
    info!(%request, "locating user");
    Outcome::changed_with(Effect::Locate { request })
}

fn on_located(state: &mut AppState, coords: Coordinates) -> Outcome {
    if state.searched_city {
        debug!(%coords, "ignoring geolocation: a searched city is active");
        return Outcome::unchanged();
    }
    if let Some(search) = pending_search(state) {
        // let the search win; fall back to these coordinates if it fails
        search.resume = Resume::FetchCoordinates(coords);
        return Outcome::unchanged();
    }
    fetch_by_coordinates(state, coords)
}

fn on_locate_failed(state: &mut AppState) -> Outcome {
    if state.searched_city {
        return Outcome::unchanged();
    }
    let known = state.active_coords;
    if let Some(search) = pending_search(state) {
        search.resume = match known {
            Some(coords) => Resume::FetchCoordinates(coords),
            None => Resume::FetchFallback,
        };
        return Outcome::unchanged();
    }
    match known {
        Some(coords) => fetch_by_coordinates(state, coords),
        None => {
            let city = state.default_city.clone();
            info!(%city, "falling back to default city");
            fetch_by_city_name(state, city, FetchOrigin::Fallback)
        }
    }
}

fn pending_search(state: &mut AppState) -> Option<&mut PendingCurrent> {
    state
        .requests
        .current
        .as_mut()
        .filter(|p| p.origin == FetchOrigin::Search)
}

/// Where to return to if the request about to be issued is a search that fails
fn resume_point(state: &AppState) -> Resume {
    match &state.requests.current {
        None => Resume::Restore {
            phase: state.phase,
            is_loading: state.is_loading,
        },
        Some(prev) => match (prev.origin, &prev.query) {
            (FetchOrigin::Search, _) => prev.resume.clone(),
            (_, LocationQuery::Coordinates(coords)) => Resume::FetchCoordinates(*coords),
            (FetchOrigin::Fallback, _) => Resume::FetchFallback,
            (origin, LocationQuery::City(name)) => Resume::FetchCity {
                name: name.clone(),
                origin,
            },
        },
    }
}

fn fetch_by_coordinates(state: &mut AppState, coords: Coordinates) -> Outcome {
    let unit = state.unit;
    let resume = resume_point(state);
    let current = state.requests.issue();
    let forecast = state.requests.issue();

    state.requests.current = Some(PendingCurrent {
        request: current,
        query: LocationQuery::Coordinates(coords),
        origin: FetchOrigin::Coordinates,
        resume,
    });
    state.requests.forecast = Some(PendingForecast {
        request: forecast,
        unit,
    });
    state.active_coords = Some(coords);
    state.phase = Phase::FetchingWeather;
    state.is_loading = true;
    state.error = None;

    info!(%coords, %unit, %current, %forecast, "fetching weather by coordinates");
    Outcome::changed_with_many(vec![
        Effect::FetchCurrent {
            request: current,
            query: LocationQuery::Coordinates(coords),
            unit,
        },
        Effect::FetchForecast {
            request: forecast,
            coords,
            unit,
        },
    ])
}

fn fetch_by_city_name(state: &mut AppState, city: String, origin: FetchOrigin) -> Outcome {
    let unit = state.unit;
    let resume = resume_point(state);
    let request = state.requests.issue();

    state.requests.current = Some(PendingCurrent {
        request,
        query: LocationQuery::City(city.clone()),
        origin,
        resume,
    });
    state.phase = Phase::FetchingWeather;
    state.is_loading = true;
    if origin != FetchOrigin::Search {
        state.error = None;
    }

    info!(%city, ?origin, %unit, %request, "fetching weather by city");
    Outcome::changed_with(Effect::FetchCurrent {
        request,
        query: LocationQuery::City(city),
        unit,
    })
}

fn fetch_forecast(state: &mut AppState, coords: Coordinates, unit: UnitMode) -> Outcome {
    let request = state.requests.issue();
    state.requests.forecast = Some(PendingForecast { request, unit });
    state.active_coords = Some(coords);
    info!(%coords, %unit, %request, "fetching forecast");
    Outcome::changed_with(Effect::FetchForecast {
        request,
        coords,
        unit,
    })
}

fn toggle_unit(state: &mut AppState, unit: UnitMode) -> Outcome {
    if state.unit == unit {
        return Outcome::unchanged();
    }
    state.unit = unit;
    info!(%unit, "unit changed");

    // an outstanding request is the active query; re-issue it in the new unit
    if let Some(pending) = state.requests.current.clone() {
        return match pending.query {
            LocationQuery::Coordinates(coords) => fetch_by_coordinates(state, coords),
            LocationQuery::City(city) => fetch_by_city_name(state, city, pending.origin),
        };
    }

    if state.searched_city {
        if let Some(city) = state.last_city.clone() {
            return fetch_by_city_name(state, city, FetchOrigin::Refresh);
        }
    }
    match state.active_coords {
        Some(coords) => fetch_by_coordinates(state, coords),
        // nothing resolved yet; a pending locate will pick up the new unit
        None => Outcome::changed(),
    }
}

fn resume(state: &mut AppState, resume: Resume) -> Outcome {
    match resume {
        Resume::Restore { phase, is_loading } => {
            state.phase = settle(state, phase);
            state.is_loading = is_loading && state.phase == phase;
            Outcome::changed()
        }
        Resume::FetchCoordinates(coords) => fetch_by_coordinates(state, coords),
        Resume::FetchFallback => {
            let city = state.default_city.clone();
            fetch_by_city_name(state, city, FetchOrigin::Fallback)
        }
        Resume::FetchCity { name, origin } => fetch_by_city_name(state, name, origin),
    }
}

/// An in-flight phase is only valid while its request is outstanding
fn settle(state: &AppState, phase: Phase) -> Phase {
    let in_flight = match phase {
        Phase::LocatingUser => state.requests.locate.is_some(),
        Phase::FetchingWeather => state.requests.current.is_some(),
        _ => return phase,
    };
    if in_flight {
        phase
    } else if state.snapshot.is_some() {
        Phase::Ready
    } else {
        Phase::Idle
    }
}

fn search_alert(error: &FetchError) -> String {
    if error.is_not_found() {
        LOCATION_NOT_FOUND.to_string()
    } else {
        format!("Could not load weather: {}", error.message)
    }
}
