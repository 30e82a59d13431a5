//! Presentational components
//!
//! Components render from read-only props borrowed from `AppState` and turn
//! key events into actions. They never touch state directly.

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

pub mod alert;
pub mod current_conditions;
pub mod forecast_strip;
pub mod help_bar;
pub mod location_header;
pub mod search_bar;
pub mod weather_display;

pub use alert::{Alert, AlertProps};
pub use current_conditions::{CurrentConditions, CurrentConditionsProps};
pub use forecast_strip::{ForecastStrip, ForecastStripProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};

pub const LOCATION_ICON: &str = "📍 ";
pub const ERROR_ICON: &str = "⚠";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spinner frame for the current animation tick
pub fn spinner(tick_count: u32) -> &'static str {
    SPINNERS[(tick_count as usize / 2) % SPINNERS.len()]
}

/// A pure UI element: renders from props, emits actions from events
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Default: render-only, no actions
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
