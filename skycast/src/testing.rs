//! Test utilities for components
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"ctrl+c"`
//! - [`RenderHarness`]: render into a ratatui `TestBackend` and read the
//!   result back as text
//!
//! These helpers panic on misuse; they are meant for tests only.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::event::EventKind;

/// Parse a key description: `"q"`, `"enter"`, `"esc"`, `"ctrl+c"`, `"f5"`.
///
/// # Panics
///
/// Panics if the string does not describe a key.
pub fn key(s: &str) -> KeyEvent {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = s.split('+').collect();
    // "+" alone, or a trailing "+" as in "ctrl++"
    if s.ends_with('+') {
        parts.retain(|p| !p.is_empty());
        parts.push("+");
    }
    let (code, mods) = parts
        .split_last()
        .unwrap_or_else(|| panic!("invalid key string: {:?}", s));

    for m in mods {
        modifiers |= match m.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            other => panic!("invalid modifier {:?} in {:?}", other, s),
        };
    }

    let code = match code.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        lower if lower.len() > 1 && lower.starts_with('f') => {
            let n = lower[1..]
                .parse()
                .unwrap_or_else(|_| panic!("invalid key string: {:?}", s));
            KeyCode::F(n)
        }
        _ => {
            let mut chars = code.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => panic!("invalid key string: {:?}", s),
            }
        }
    };

    KeyEvent::new(code, modifiers)
}

/// Key press as an [`EventKind`]
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Renders into an in-memory terminal
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("test terminal: {}", e));
        Self { terminal }
    }

    /// Draw one frame and return the buffer
    pub fn render<F>(&mut self, render: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(render)
            .unwrap_or_else(|e| panic!("draw failed: {}", e));
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, styles stripped, trailing
    /// whitespace trimmed per line
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(render))
    }
}

pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_parsing() {
        assert_eq!(key("q").code, KeyCode::Char('q'));
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("f5").code, KeyCode::F(5));
        assert_eq!(key("/").code, KeyCode::Char('/'));

        let k = key("ctrl+c");
        assert_eq!(k.code, KeyCode::Char('c'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    #[should_panic(expected = "invalid key string")]
    fn test_key_rejects_garbage() {
        key("nope");
    }

    #[test]
    fn test_render_to_string() {
        let mut harness = RenderHarness::new(10, 2);
        let out = harness.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });
        assert_eq!(out, "hello\n");
    }
}
