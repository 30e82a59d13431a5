use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skycast_core::{format_temperature, Action, Phase, UnitMode, WeatherSnapshot};

use super::{spinner, Component, ERROR_ICON};
use crate::icons::condition_glyph;

pub struct CurrentConditions;

pub struct CurrentConditionsProps<'a> {
    pub snapshot: Option<&'a WeatherSnapshot>,
    /// Unit selected for display; wind follows it
    pub unit: UnitMode,
    pub phase: Phase,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub tick_count: u32,
}

enum View<'a> {
    Ready(&'a WeatherSnapshot),
    Loading,
    Error(&'a str),
    Empty,
}

impl<'a> View<'a> {
    fn from_props(props: &CurrentConditionsProps<'a>) -> Self {
        if let Some(snapshot) = props.snapshot {
            View::Ready(snapshot)
        } else if props.is_loading {
            View::Loading
        } else if let Some(error) = props.error {
            View::Error(error)
        } else {
            View::Empty
        }
    }
}

impl Component<Action> for CurrentConditions {
    type Props<'a> = CurrentConditionsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = match View::from_props(&props) {
            View::Ready(snapshot) => ready_lines(snapshot, &props),
            View::Loading => {
                let label = if props.phase == Phase::LocatingUser {
                    " Locating you..."
                } else {
                    " Fetching weather..."
                };
                vec![Line::from(vec![
                    Span::styled(spinner(props.tick_count), Style::default().fg(Color::Cyan)),
                    Span::styled(label, Style::default().fg(Color::Gray)),
                ])]
            }
            View::Error(error) => vec![
                Line::from(Span::styled(
                    format!("{} Error", ERROR_ICON),
                    Style::default().fg(Color::Red).bold(),
                )),
                Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Rgb(200, 100, 100)),
                )),
                Line::from(""),
                press_to("r", " to retry"),
            ],
            View::Empty => vec![press_to("r", " to fetch weather")],
        };

        let height = lines.len() as u16;
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let lines: Vec<Line> = lines.into_iter().map(Line::centered).collect();
        frame.render_widget(Paragraph::new(lines), centered);
    }
}

fn ready_lines<'a>(snapshot: &'a WeatherSnapshot, props: &CurrentConditionsProps<'_>) -> Vec<Line<'a>> {
    let unit = snapshot.unit;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let mut lines = vec![
        Line::from(vec![
            Span::raw(condition_glyph(&snapshot.condition)),
            Span::styled(
                format!("  {}", snapshot.condition.label()),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            format_temperature(snapshot.temperature, unit),
            Style::default().fg(temp_to_color(snapshot.temperature, unit)).bold(),
        )),
        Line::from(vec![
            Span::styled("Feels like ", label),
            Span::styled(format_temperature(snapshot.feels_like, unit), value),
        ]),
        Line::from(vec![
            Span::styled("Humidity ", label),
            Span::styled(format!("{}%", snapshot.humidity), value),
            Span::styled("   Wind ", label),
            Span::styled(snapshot.wind(props.unit).to_string(), value),
        ]),
    ];

    // a failed refresh keeps the last snapshot on screen
    if let Some(error) = props.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} {} (showing last known conditions)", ERROR_ICON, error),
            Style::default().fg(Color::Rgb(200, 100, 100)),
        )));
    }
    lines
}

fn press_to(key: &'static str, rest: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled(key, Style::default().fg(Color::Cyan).bold()),
        Span::styled(rest, Style::default().fg(Color::DarkGray)),
    ])
}

/// Temperature-based color, thresholds in °C
fn temp_to_color(value: f64, unit: UnitMode) -> Color {
    let celsius = match unit {
        UnitMode::Metric => value,
        UnitMode::Imperial => (value - 32.0) * 5.0 / 9.0,
    };
    match celsius.round() as i32 {
        ..=-10 => Color::Rgb(150, 200, 255),
        -9..=0 => Color::Rgb(100, 180, 255),
        1..=10 => Color::Rgb(100, 220, 200),
        11..=20 => Color::Rgb(150, 230, 150),
        21..=30 => Color::Rgb(255, 220, 100),
        31..=40 => Color::Rgb(255, 150, 80),
        _ => Color::Rgb(255, 100, 100),
    }
}
