use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skycast_core::{Action, Coordinates, Phase};

use super::{Component, LOCATION_ICON};

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    /// Resolved name of the location on screen
    pub name: Option<&'a str>,
    pub coords: Option<Coordinates>,
    pub phase: Phase,
    pub clock: Option<DateTime<Local>>,
}

impl LocationHeader {
    pub const HEIGHT: u16 = 2;
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let name = match (props.name, props.phase) {
            (Some(name), _) => Span::styled(name.to_string(), Style::default().fg(Color::White).bold()),
            (None, Phase::LocatingUser) => {
                Span::styled("Locating...", Style::default().fg(Color::Gray).italic())
            }
            (None, _) => Span::styled("No location", Style::default().fg(Color::DarkGray)),
        };
        let location_line = Line::from(vec![Span::raw(LOCATION_ICON), name]).centered();
        frame.render_widget(Paragraph::new(location_line), chunks[0]);

        let mut details = Vec::new();
        if let Some(coords) = props.coords {
            details.push(Span::styled(coords.to_string(), Style::default().fg(Color::DarkGray)));
        }
        if let Some(clock) = props.clock {
            if !details.is_empty() {
                details.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
            }
            details.push(Span::styled(
                clock.format("%a %H:%M").to_string(),
                Style::default().fg(Color::Gray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(details).centered()), chunks[1]);
    }
}
