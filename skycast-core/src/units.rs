//! Unit modes and display conversion
//!
//! Wind speed is always carried in meters/second and converted at display
//! time. Temperatures arrive from the API already in the requested unit, so
//! only their label depends on [`UnitMode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// m/s -> km/h
pub const KMH_PER_MPS: f64 = 3.6;

/// m/s -> mph
pub const MPH_PER_MPS: f64 = 2.237;

/// Measurement system used for API requests and display
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    #[default]
    Metric,
    Imperial,
}

impl UnitMode {
    pub fn toggle(self) -> Self {
        match self {
            UnitMode::Metric => UnitMode::Imperial,
            UnitMode::Imperial => UnitMode::Metric,
        }
    }

    /// Value of the `units` query parameter
    pub fn api_param(self) -> &'static str {
        match self {
            UnitMode::Metric => "metric",
            UnitMode::Imperial => "imperial",
        }
    }

    pub fn temperature_label(self) -> &'static str {
        match self {
            UnitMode::Metric => "°C",
            UnitMode::Imperial => "°F",
        }
    }

    pub fn wind_label(self) -> &'static str {
        match self {
            UnitMode::Metric => "km/h",
            UnitMode::Imperial => "mph",
        }
    }

    fn wind_factor(self) -> f64 {
        match self {
            UnitMode::Metric => KMH_PER_MPS,
            UnitMode::Imperial => MPH_PER_MPS,
        }
    }
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_param())
    }
}

/// Unknown unit name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit mode '{0}' (expected 'metric' or 'imperial')")]
pub struct ParseUnitError(String);

impl FromStr for UnitMode {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(UnitMode::Metric),
            "imperial" => Ok(UnitMode::Imperial),
            other => Err(ParseUnitError(other.to_string())),
        }
    }
}

/// A rounded wind speed ready for display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindSpeed {
    pub value: i64,
    pub label: &'static str,
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.label)
    }
}

/// Convert a wind speed in m/s into the display unit, rounded to a whole number
pub fn convert_wind_speed(speed_mps: f64, unit: UnitMode) -> WindSpeed {
    WindSpeed {
        value: (speed_mps * unit.wind_factor()).round() as i64,
        label: unit.wind_label(),
    }
}

/// Turn a wind speed reported in `unit` back into m/s
pub fn wind_to_mps(speed: f64, unit: UnitMode) -> f64 {
    match unit {
        UnitMode::Metric => speed,
        UnitMode::Imperial => speed / MPH_PER_MPS,
    }
}

/// Whole-degree temperature with its label, e.g. `21°C`
pub fn format_temperature(value: f64, unit: UnitMode) -> String {
    // avoid "-0°C"
    let rounded = value.round();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}{}", rounded, unit.temperature_label())
}
