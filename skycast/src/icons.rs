//! Condition and icon-code glyphs

use skycast_core::weather::{Atmosphere, Condition};

pub const UNKNOWN_GLYPH: &str = "·";

/// Glyph for a current-conditions category
pub fn condition_glyph(condition: &Condition) -> &'static str {
    match condition {
        Condition::Clear => "☀",
        Condition::Clouds => "☁",
        Condition::Rain => "🌧",
        Condition::Drizzle => "🌦",
        Condition::Snow => "❄",
        Condition::Thunderstorm => "⛈",
        Condition::Atmosphere(Atmosphere::Tornado) => "🌪",
        Condition::Atmosphere(_) => "🌫",
        Condition::Other(_) => UNKNOWN_GLYPH,
    }
}

/// Glyph for an OpenWeatherMap icon code such as `"10d"`
pub fn icon_glyph(code: &str) -> &'static str {
    match code.get(..2) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") => "🌧",
        Some("10") => "🌦",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => UNKNOWN_GLYPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_glyphs() {
        assert_eq!(condition_glyph(&Condition::Clear), "☀");
        assert_eq!(condition_glyph(&Condition::Atmosphere(Atmosphere::Haze)), "🌫");
        assert_eq!(condition_glyph(&Condition::Other("Aliens".into())), UNKNOWN_GLYPH);
    }

    #[test]
    fn test_icon_codes() {
        assert_eq!(icon_glyph("01n"), "☀");
        assert_eq!(icon_glyph("04d"), "☁");
        assert_eq!(icon_glyph("13d"), "❄");
        assert_eq!(icon_glyph(""), UNKNOWN_GLYPH);
        assert_eq!(icon_glyph("9"), UNKNOWN_GLYPH);
    }
}
