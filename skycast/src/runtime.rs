//! Event/action/render loop
//!
//! 1. Terminal event -> component `handle_event` -> actions
//! 2. Actions dispatched through the [`WeatherController`]
//! 3. The reducer updates state and declares effects, which the controller
//!    runs as tasks
//! 4. Task results come back as actions
//! 5. Re-render when state changed

use std::io;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use skycast_core::{Action, AppState, Subscriptions, WeatherController};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::components::{
    Alert, AlertProps, Component, SearchBar, SearchBarProps, WeatherDisplay, WeatherDisplayProps,
};
use crate::event::{spawn_event_poller, EventKind, PollerConfig};

/// Result of mapping an event: actions plus a render hint
#[derive(Debug, Default, PartialEq)]
pub struct EventOutcome {
    pub actions: Vec<Action>,
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

/// Routes events to whichever component has focus and renders the tree
#[derive(Default)]
pub struct WeatherUi {
    display: WeatherDisplay,
}

impl WeatherUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.display.render(
            frame,
            area,
            WeatherDisplayProps {
                state,
                is_focused: !state.search_focused && state.alert.is_none(),
            },
        );

        if let Some(message) = state.alert.as_deref() {
            Alert.render(frame, area, AlertProps { message });
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome {
        match event {
            EventKind::Resize(..) => return EventOutcome::default().with_render(),
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c') =>
            {
                return EventOutcome::from_actions([Action::Quit]);
            }
            EventKind::Key(_) => {}
        }

        if let Some(message) = state.alert.as_deref() {
            return EventOutcome::from_actions(Alert.handle_event(event, AlertProps { message }));
        }

        if state.search_focused {
            let props = SearchBarProps {
                query: &state.search_query,
                is_focused: true,
            };
            return EventOutcome::from_actions(SearchBar.handle_event(event, props));
        }

        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        EventOutcome::from_actions(self.display.handle_event(event, props))
    }
}

/// Run until the user quits. Dispatches `AppInit` first.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut WeatherController,
    refresh_interval: Option<Duration>,
) -> io::Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EventKind>();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());
    let mut subscriptions = Subscriptions::standard(controller.action_tx(), refresh_interval);

    let mut ui = WeatherUi::new();
    controller.dispatch(Action::AppInit);
    let mut should_render = true;

    let result = loop {
        if should_render {
            let state = controller.state();
            if let Err(e) = terminal.draw(|frame| {
                let area = frame.area();
                ui.render(frame, area, state);
            }) {
                break Err(e);
            }
            should_render = false;
        }

        tokio::select! {
            Some(event) = event_rx.recv() => {
                let outcome = ui.map_event(&event, controller.state());
                should_render |= outcome.needs_render;
                if outcome.actions.contains(&Action::Quit) {
                    break Ok(());
                }
                for action in outcome.actions {
                    should_render |= controller.dispatch(action);
                }
            }

            Some(action) = controller.next_action() => {
                if action == Action::Quit {
                    break Ok(());
                }
                should_render |= controller.dispatch(action);
            }

            else => break Ok(()),
        }
    };

    info!("shutting down");
    cancel_token.cancel();
    subscriptions.cancel_all();
    controller.shutdown();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::key_event;

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut ui = WeatherUi::new();
        let state = AppState {
            search_focused: true,
            ..AppState::default()
        };
        let outcome = ui.map_event(&key_event("ctrl+c"), &state);
        assert_eq!(outcome.actions, vec![Action::Quit]);
    }

    #[test]
    fn test_search_focus_routes_keys_to_search_bar() {
        let mut ui = WeatherUi::new();
        let state = AppState {
            search_focused: true,
            ..AppState::default()
        };
        // 'q' types into the box instead of quitting
        let outcome = ui.map_event(&key_event("q"), &state);
        assert_eq!(outcome.actions, vec![Action::SearchInput('q')]);
    }

    #[test]
    fn test_alert_swallows_next_key() {
        let mut ui = WeatherUi::new();
        let state = AppState {
            alert: Some("Location not found. Please try again.".into()),
            ..AppState::default()
        };
        let outcome = ui.map_event(&key_event("q"), &state);
        assert_eq!(outcome.actions, vec![Action::AlertDismiss]);
    }

    #[test]
    fn test_resize_requests_render() {
        let mut ui = WeatherUi::new();
        let outcome = ui.map_event(&EventKind::Resize(100, 40), &AppState::default());
        assert!(outcome.needs_render);
        assert!(outcome.actions.is_empty());
    }
}
