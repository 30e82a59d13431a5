//! City search input
//!
//! The buffer lives in `AppState`; this component only renders it and maps
//! keys to `Search*` actions while focused.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skycast_core::Action;

use super::Component;
use crate::event::EventKind;

pub const PLACEHOLDER: &str = "Press / to search for a city";
const CURSOR: &str = "▏";

pub struct SearchBar;

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
}

impl SearchBar {
    pub const HEIGHT: u16 = 3;
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return match key.code {
                KeyCode::Char('u') => Some(Action::SearchClear),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Esc => Some(Action::SearchBlur),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::Rgb(80, 80, 100)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search city ");

        let line = if props.is_focused {
            Line::from(vec![
                Span::styled(props.query.to_string(), Style::default().fg(Color::White)),
                Span::styled(CURSOR, Style::default().fg(Color::Cyan)),
            ])
        } else if props.query.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray).italic()))
        } else {
            Line::from(Span::styled(props.query.to_string(), Style::default().fg(Color::Gray)))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key_event, RenderHarness};

    fn actions(event: EventKind, query: &str, is_focused: bool) -> Vec<Action> {
        SearchBar
            .handle_event(&event, SearchBarProps { query, is_focused })
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_and_submit() {
        assert_eq!(actions(key_event("a"), "", true), vec![Action::SearchInput('a')]);
        assert_eq!(actions(key_event("space"), "a", true), vec![Action::SearchInput(' ')]);
        assert_eq!(actions(key_event("backspace"), "a", true), vec![Action::SearchBackspace]);
        assert_eq!(actions(key_event("enter"), "Paris", true), vec![Action::SearchSubmit]);
        assert_eq!(actions(key_event("esc"), "Paris", true), vec![Action::SearchBlur]);
        assert_eq!(actions(key_event("ctrl+u"), "Paris", true), vec![Action::SearchClear]);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        assert!(actions(key_event("a"), "", false).is_empty());
    }

    #[test]
    fn test_render_placeholder_and_query() {
        let mut render = RenderHarness::new(50, 3);
        let output = render.render_to_string_plain(|frame| {
            SearchBar.render(frame, frame.area(), SearchBarProps { query: "", is_focused: false });
        });
        assert!(output.contains(PLACEHOLDER));

        let output = render.render_to_string_plain(|frame| {
            SearchBar.render(frame, frame.area(), SearchBarProps { query: "Osl", is_focused: true });
        });
        assert!(output.contains("Osl"));
        assert!(output.contains("Search city"));
    }
}
