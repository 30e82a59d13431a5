use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skycast_core::{displayed_forecast, format_temperature, Action, ForecastEntry, UnitMode};

use super::Component;
use crate::icons::icon_glyph;

pub const LOADING_FORECAST: &str = "Loading forecast...";

pub struct ForecastStrip;

pub struct ForecastStripProps<'a> {
    /// Full forecast as received, today first
    pub entries: &'a [ForecastEntry],
    /// Unit the entries were fetched in
    pub unit: UnitMode,
}

impl ForecastStrip {
    /// Border plus weekday, glyph, high and low
    pub const HEIGHT: u16 = 6;
}

impl Component<Action> for ForecastStrip {
    type Props<'a> = ForecastStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Forecast ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.entries.is_empty() {
            let placeholder = Line::styled(LOADING_FORECAST, Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(Paragraph::new(placeholder), inner);
            return;
        }

        let days = displayed_forecast(props.entries);
        if days.is_empty() {
            return;
        }

        let columns = Layout::horizontal(days.iter().map(|_| Constraint::Fill(1))).split(inner);
        for (day, column) in days.iter().zip(columns.iter()) {
            let lines = vec![
                Line::styled(day.weekday(), Style::default().fg(Color::Gray).bold()).centered(),
                Line::raw(icon_glyph(&day.icon)).centered(),
                Line::styled(
                    format_temperature(day.temp_max, props.unit),
                    Style::default().fg(Color::White),
                )
                .centered(),
                Line::styled(
                    format_temperature(day.temp_min, props.unit),
                    Style::default().fg(Color::DarkGray),
                )
                .centered(),
            ];
            frame.render_widget(Paragraph::new(lines), *column);
        }
    }
}
