//! Modal alert for user-facing failures

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use skycast_core::Action;

use super::{Component, ERROR_ICON};
use crate::event::EventKind;

pub const DISMISS_HINT: &str = "press any key";

pub struct Alert;

pub struct AlertProps<'a> {
    pub message: &'a str,
}

impl Component<Action> for Alert {
    type Props<'a> = AlertProps<'a>;

    /// Any key dismisses
    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        matches!(event, EventKind::Key(_)).then_some(Action::AlertDismiss)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let width = (props.message.chars().count() as u16 + 6).clamp(30, 60);
        let modal = centered_rect(width, 7, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", ERROR_ICON))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Rgb(30, 30, 40)));

        let lines = vec![
            Line::from(""),
            Line::styled(props.message.to_string(), Style::default().fg(Color::White).bold()),
            Line::from(""),
            Line::styled(DISMISS_HINT, Style::default().fg(Color::DarkGray)),
        ];

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            modal,
        );
    }
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
