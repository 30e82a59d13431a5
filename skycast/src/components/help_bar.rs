use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skycast_core::Action;

use super::Component;

pub struct HelpBar;

pub struct HelpBarProps {
    pub search_focused: bool,
}

impl HelpBar {
    fn bindings(search_focused: bool) -> &'static [(&'static str, &'static str)] {
        if search_focused {
            &[("Enter", "search"), ("Esc", "cancel")]
        } else {
            &[("/", "search"), ("u", "units"), ("r", "refresh"), ("q", "quit")]
        }
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = Self::bindings(props.search_focused)
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {}", key), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
