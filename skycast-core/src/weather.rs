//! Weather domain types: current snapshot and daily forecast

use chrono::{DateTime, FixedOffset, Utc};

use crate::location::Coordinates;
use crate::units::{convert_wind_speed, UnitMode, WindSpeed};

/// Number of forecast days shown after skipping today
pub const FORECAST_DAYS_SHOWN: usize = 7;

/// Atmospheric obscuration categories reported by the API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Atmosphere {
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Squall,
    Tornado,
}

/// Short weather-condition category used for icon selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    Atmosphere(Atmosphere),
    Other(String),
}

impl Condition {
    /// Map the API's `weather[0].main` value
    pub fn from_main(main: &str) -> Self {
        match main {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Snow" => Condition::Snow,
            "Thunderstorm" => Condition::Thunderstorm,
            "Mist" => Condition::Atmosphere(Atmosphere::Mist),
            "Smoke" => Condition::Atmosphere(Atmosphere::Smoke),
            "Haze" => Condition::Atmosphere(Atmosphere::Haze),
            "Dust" => Condition::Atmosphere(Atmosphere::Dust),
            "Fog" => Condition::Atmosphere(Atmosphere::Fog),
            "Sand" => Condition::Atmosphere(Atmosphere::Sand),
            "Ash" => Condition::Atmosphere(Atmosphere::Ash),
            "Squall" => Condition::Atmosphere(Atmosphere::Squall),
            "Tornado" => Condition::Atmosphere(Atmosphere::Tornado),
            other => Condition::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Drizzle => "Drizzle",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Atmosphere(kind) => match kind {
                Atmosphere::Mist => "Mist",
                Atmosphere::Smoke => "Smoke",
                Atmosphere::Haze => "Haze",
                Atmosphere::Dust => "Dust",
                Atmosphere::Fog => "Fog",
                Atmosphere::Sand => "Sand",
                Atmosphere::Ash => "Ash",
                Atmosphere::Squall => "Squall",
                Atmosphere::Tornado => "Tornado",
            },
            Condition::Other(name) => name,
        }
    }
}

/// Current conditions for one resolved location.
///
/// Temperatures are in `unit`; wind speed is always m/s.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSnapshot {
    pub name: String,
    pub coords: Coordinates,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed_mps: f64,
    pub condition: Condition,
    pub unit: UnitMode,
}

impl WeatherSnapshot {
    pub fn wind(&self, display_unit: UnitMode) -> WindSpeed {
        convert_wind_speed(self.wind_speed_mps, display_unit)
    }
}

/// One day of the daily forecast
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    /// UTC offset of the forecast location, used for weekday display
    pub utc_offset: FixedOffset,
    pub temp_max: f64,
    pub temp_min: f64,
    pub icon: String,
    pub description: String,
}

impl ForecastEntry {
    /// Short weekday name in the location's local time ("Mon")
    pub fn weekday(&self) -> String {
        self.time
            .with_timezone(&self.utc_offset)
            .format("%a")
            .to_string()
    }
}

/// The entries to display: skip today (index 0), then at most 7 days, in order
pub fn displayed_forecast(entries: &[ForecastEntry]) -> &[ForecastEntry] {
    let rest = entries.get(1..).unwrap_or(&[]);
    &rest[..rest.len().min(FORECAST_DAYS_SHOWN)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(day: u32) -> ForecastEntry {
        ForecastEntry {
            time: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            utc_offset: FixedOffset::east_opt(0).unwrap(),
            temp_max: 10.0 + day as f64,
            temp_min: day as f64,
            icon: "01d".into(),
            description: "clear sky".into(),
        }
    }

    #[test]
    fn test_displayed_forecast_skips_today() {
        let entries: Vec<_> = (1..=8).map(entry).collect();
        let shown = displayed_forecast(&entries);
        assert_eq!(shown.len(), 7);
        assert_eq!(shown[0], entries[1]);
        assert_eq!(shown[6], entries[7]);
    }

    #[test]
    fn test_displayed_forecast_caps_at_seven() {
        let entries: Vec<_> = (1..=10).map(entry).collect();
        assert_eq!(displayed_forecast(&entries).len(), 7);
    }

    #[test]
    fn test_displayed_forecast_short_inputs() {
        assert!(displayed_forecast(&[]).is_empty());
        assert!(displayed_forecast(&[entry(1)]).is_empty());
        assert_eq!(displayed_forecast(&[entry(1), entry(2)]).len(), 1);
    }

    #[test]
    fn test_weekday_uses_location_offset() {
        // 2024-01-01 23:00 UTC is already Tuesday in UTC+2
        let e = ForecastEntry {
            time: Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap(),
            utc_offset: FixedOffset::east_opt(2 * 3600).unwrap(),
            ..entry(1)
        };
        assert_eq!(e.weekday(), "Tue");
    }

    #[test]
    fn test_condition_mapping() {
        assert_eq!(Condition::from_main("Clouds"), Condition::Clouds);
        assert_eq!(
            Condition::from_main("Fog"),
            Condition::Atmosphere(Atmosphere::Fog)
        );
        let other = Condition::from_main("Aurora");
        assert_eq!(other.label(), "Aurora");
    }
}
