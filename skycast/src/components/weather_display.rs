//! Root weather view
//!
//! Lays out header, search bar, current conditions, forecast and help bar
//! inside one bordered frame, and maps the global keys.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
    Frame,
};
use skycast_core::{Action, AppState};

use super::{
    spinner, Component, CurrentConditions, CurrentConditionsProps, ForecastStrip,
    ForecastStripProps, HelpBar, HelpBarProps, LocationHeader, LocationHeaderProps, SearchBar,
    SearchBarProps,
};
use crate::event::EventKind;

pub const TITLE: &str = " ☁ skycast";

pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct WeatherDisplay;

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') => Some(Action::SearchFocus),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherRefresh),
                KeyCode::Char('u') => Some(Action::UnitToggle),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            EventKind::Resize(..) => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;

        let loading_indicator = if state.is_loading {
            format!(" {} ", spinner(state.tick_count))
        } else {
            " ".to_string()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!("{}{}", TITLE, loading_indicator))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let [header, search, body, forecast, help] = Layout::vertical([
            Constraint::Length(LocationHeader::HEIGHT),
            Constraint::Length(SearchBar::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(ForecastStrip::HEIGHT),
            Constraint::Length(1),
        ])
        .areas(inner);

        LocationHeader.render(
            frame,
            header,
            LocationHeaderProps {
                name: state.location_name(),
                coords: state.snapshot.as_ref().map(|s| s.coords),
                phase: state.phase,
                clock: state.clock,
            },
        );

        SearchBar.render(
            frame,
            search,
            SearchBarProps {
                query: &state.search_query,
                is_focused: state.search_focused,
            },
        );

        CurrentConditions.render(
            frame,
            body,
            CurrentConditionsProps {
                snapshot: state.snapshot.as_ref(),
                unit: state.unit,
                phase: state.phase,
                is_loading: state.is_loading,
                error: state.error.as_deref(),
                tick_count: state.tick_count,
            },
        );

        ForecastStrip.render(
            frame,
            forecast,
            ForecastStripProps {
                entries: &state.forecast,
                unit: state.forecast_unit,
            },
        );

        HelpBar.render(
            frame,
            help,
            HelpBarProps {
                search_focused: state.search_focused,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::key_event;

    fn actions(key: &str, is_focused: bool) -> Vec<Action> {
        let state = AppState::default();
        WeatherDisplay
            .handle_event(
                &key_event(key),
                WeatherDisplayProps {
                    state: &state,
                    is_focused,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_handle_event_keys() {
        assert_eq!(actions("r", true), vec![Action::WeatherRefresh]);
        assert_eq!(actions("u", true), vec![Action::UnitToggle]);
        assert_eq!(actions("/", true), vec![Action::SearchFocus]);
        assert_eq!(actions("q", true), vec![Action::Quit]);
        assert_eq!(actions("esc", true), vec![Action::Quit]);
        assert!(actions("x", true).is_empty());
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        assert!(actions("r", false).is_empty());
    }
}
