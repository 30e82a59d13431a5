//! Actions
//!
//! Naming follows the intent/result convention: `WeatherRefresh` asks for
//! work, `WeatherDidLoad` / `WeatherDidError` report it. Result actions carry
//! the [`RequestId`] of the request they answer.

use chrono::{DateTime, Local};

use crate::api::FetchError;
use crate::geo::GeoError;
use crate::location::Coordinates;
use crate::state::RequestId;
use crate::units::UnitMode;
use crate::weather::{ForecastEntry, WeatherSnapshot};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== App lifecycle =====
    /// Startup: locate the user unless a city was already searched
    AppInit,

    // ===== Geolocation =====
    GeoDidLocate {
        request: RequestId,
        coords: Coordinates,
    },
    GeoDidFail {
        request: RequestId,
        error: GeoError,
    },

    // ===== Weather =====
    /// Re-fetch the active location (key press or auto-refresh)
    WeatherRefresh,
    WeatherDidLoad {
        request: RequestId,
        snapshot: WeatherSnapshot,
    },
    WeatherDidError {
        request: RequestId,
        error: FetchError,
    },

    // ===== Forecast =====
    ForecastDidLoad {
        request: RequestId,
        entries: Vec<ForecastEntry>,
    },
    ForecastDidError {
        request: RequestId,
        error: FetchError,
    },

    // ===== Search input =====
    SearchFocus,
    SearchBlur,
    SearchInput(char),
    SearchBackspace,
    SearchClear,
    /// Enter pressed in the search box
    SearchSubmit,

    // ===== Units =====
    UnitToggle,
    UnitSet(UnitMode),

    // ===== UI =====
    AlertDismiss,
    ClockTick(DateTime<Local>),
    /// Periodic tick for loading animation
    Tick,
    Quit,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AppInit => "AppInit",
            Action::GeoDidLocate { .. } => "GeoDidLocate",
            Action::GeoDidFail { .. } => "GeoDidFail",
            Action::WeatherRefresh => "WeatherRefresh",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::ForecastDidLoad { .. } => "ForecastDidLoad",
            Action::ForecastDidError { .. } => "ForecastDidError",
            Action::SearchFocus => "SearchFocus",
            Action::SearchBlur => "SearchBlur",
            Action::SearchInput(_) => "SearchInput",
            Action::SearchBackspace => "SearchBackspace",
            Action::SearchClear => "SearchClear",
            Action::SearchSubmit => "SearchSubmit",
            Action::UnitToggle => "UnitToggle",
            Action::UnitSet(_) => "UnitSet",
            Action::AlertDismiss => "AlertDismiss",
            Action::ClockTick(_) => "ClockTick",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// High-frequency actions that are not worth logging
    pub fn is_noisy(&self) -> bool {
        matches!(self, Action::Tick | Action::ClockTick(_))
    }

    /// Concise description for action logging
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad { request, snapshot } => format!(
                "WeatherDidLoad {{ {}, {}: {:.1}{} }}",
                request,
                snapshot.name,
                snapshot.temperature,
                snapshot.unit.temperature_label()
            ),
            Action::ForecastDidLoad { request, entries } => {
                format!("ForecastDidLoad {{ {}, days: {} }}", request, entries.len())
            }
            Action::WeatherDidError { request, error }
            | Action::ForecastDidError { request, error } => {
                format!("{} {{ {}, {:?} }}", self.name(), request, truncate(&error.message))
            }
            _ => format!("{:?}", self),
        }
    }
}

fn truncate(msg: &str) -> String {
    if msg.chars().count() > 40 {
        format!("{}...", msg.chars().take(37).collect::<String>())
    } else {
        msg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchErrorKind;

    #[test]
    fn test_summary_truncates_errors() {
        let action = Action::WeatherDidError {
            request: RequestId(3),
            error: FetchError::new(FetchErrorKind::Network, "x".repeat(80)),
        };
        let summary = action.summary();
        assert!(summary.starts_with("WeatherDidError { #3,"));
        assert!(summary.contains("..."));
        assert!(summary.len() < 80);
    }

    #[test]
    fn test_noisy_actions() {
        assert!(Action::Tick.is_noisy());
        assert!(!Action::UnitToggle.is_noisy());
    }
}
