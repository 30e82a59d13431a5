//! Application state - single source of truth
//!
//! Only the reducer mutates this. Views receive `&AppState`.

use chrono::{DateTime, Local};

use crate::location::{Coordinates, LocationQuery};
use crate::units::UnitMode;
use crate::weather::{ForecastEntry, WeatherSnapshot};

pub const DEFAULT_CITY: &str = "London";

/// Where the coordinator is in the fetch cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    LocatingUser,
    FetchingWeather,
    Ready,
    Error,
}

/// Sequence number attached to every dispatched request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a current-weather request was issued
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Geolocation or last known coordinates
    Coordinates,
    /// Typed by the user
    Search,
    /// Default city after geolocation failed
    Fallback,
    /// Re-run of the last searched city (unit change, refresh)
    Refresh,
}

/// What to do if an outstanding search fails
#[derive(Clone, Debug, PartialEq)]
pub enum Resume {
    /// Put phase and loading flag back as they were
    Restore { phase: Phase, is_loading: bool },
    /// Coordinates became known while the search was outstanding
    FetchCoordinates(Coordinates),
    /// Geolocation failed while the search was outstanding
    FetchFallback,
    /// A city re-fetch (unit change, refresh) was superseded by the search
    FetchCity { name: String, origin: FetchOrigin },
}

/// The outstanding current-weather request
#[derive(Clone, Debug, PartialEq)]
pub struct PendingCurrent {
    pub request: RequestId,
    pub query: LocationQuery,
    pub origin: FetchOrigin,
    pub resume: Resume,
}

/// The outstanding forecast request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingForecast {
    pub request: RequestId,
    pub unit: UnitMode,
}

/// Latest dispatched request per stream. A response is accepted only if
/// its id matches the outstanding request of its stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Requests {
    next: u64,
    pub locate: Option<RequestId>,
    pub current: Option<PendingCurrent>,
    pub forecast: Option<PendingForecast>,
}

impl Requests {
    /// Allocate the next sequence number
    pub fn issue(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }

    pub fn take_locate(&mut self, request: RequestId) -> bool {
        if self.locate == Some(request) {
            self.locate = None;
            true
        } else {
            false
        }
    }

    pub fn take_current(&mut self, request: RequestId) -> Option<PendingCurrent> {
        if self.current.as_ref().is_some_and(|p| p.request == request) {
            self.current.take()
        } else {
            None
        }
    }

    pub fn take_forecast(&mut self, request: RequestId) -> Option<PendingForecast> {
        if self.forecast.is_some_and(|p| p.request == request) {
            self.forecast.take()
        } else {
            None
        }
    }

    /// Is a user-typed search outstanding?
    pub fn search_pending(&self) -> bool {
        matches!(&self.current, Some(p) if p.origin == FetchOrigin::Search)
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    pub phase: Phase,

    /// Latest accepted current conditions (None = nothing loaded yet)
    pub snapshot: Option<WeatherSnapshot>,

    /// Latest accepted daily forecast, today first
    pub forecast: Vec<ForecastEntry>,

    /// Unit the forecast temperatures were fetched in
    pub forecast_unit: UnitMode,

    /// True while the latest current-weather request is outstanding
    pub is_loading: bool,

    pub unit: UnitMode,

    /// Set once a typed search succeeded; disables geolocation refresh
    pub searched_city: bool,

    /// Query text of the last successful search, re-run on refresh and
    /// unit change. The resolved name is only shown via `snapshot`.
    pub last_city: Option<String>,

    /// Coordinates of the active location
    pub active_coords: Option<Coordinates>,

    /// Queried when geolocation is unavailable
    pub default_city: String,

    pub search_query: String,
    pub search_focused: bool,

    /// User-facing failure message shown as a modal
    pub alert: Option<String>,

    /// Error from the last failed current-weather fetch
    pub error: Option<String>,

    pub requests: Requests,

    /// Clock display, updated by the clock subscription
    pub clock: Option<DateTime<Local>>,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,
}

impl AppState {
    pub fn new(default_city: impl Into<String>, unit: UnitMode) -> Self {
        Self {
            phase: Phase::Idle,
            snapshot: None,
            forecast: Vec::new(),
            forecast_unit: unit,
            is_loading: false,
            unit,
            searched_city: false,
            last_city: None,
            active_coords: None,
            default_city: default_city.into(),
            search_query: String::new(),
            search_focused: false,
            alert: None,
            error: None,
            requests: Requests::default(),
            clock: None,
            tick_count: 0,
        }
    }

    /// Name of the location currently on screen
    pub fn location_name(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.name.as_str())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY, UnitMode::default())
    }
}
