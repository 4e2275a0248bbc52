//! FilterInput — the search bar, backed by tui-input.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// The query text changed; the gallery must be re-rendered.
    Changed(String),
    /// Enter: keep the query, leave the input.
    Confirmed,
    /// Esc on an empty input: leave the input.
    Cancelled,
}

pub struct FilterInput {
    input: Input,
    active: bool,
    placeholder: &'static str,
}

impl FilterInput {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Esc clears a non-empty query first; a second Esc closes the input.
    pub fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Esc if self.input.value().is_empty() => {
                self.deactivate();
                FilterAction::Cancelled
            }
            KeyCode::Esc => {
                self.input = Input::default();
                FilterAction::Changed(String::new())
            }
            KeyCode::Enter => {
                self.deactivate();
                FilterAction::Confirmed
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                FilterAction::Changed(self.input.value().to_string())
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        const PREFIX: &str = "search: ";
        let prefix_w = PREFIX.len() as u16;
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(prefix_w + 1) as usize);
        let value = self.input.value();

        let body = if value.is_empty() {
            Span::styled(self.placeholder, Style::default().fg(C_MUTED))
        } else {
            Span::styled(
                value.chars().skip(scroll).collect::<String>(),
                Style::default().fg(C_FILTER_FG),
            )
        };
        let line = Line::from(vec![
            Span::styled(PREFIX, Style::default().fg(C_FILTER_FG)),
            body,
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(C_FILTER_BG)),
            area,
        );

        if self.active {
            let cursor_x = area.x + prefix_w + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_every_change() {
        let mut f = FilterInput::new("name…");
        f.activate();
        assert_eq!(f.handle_key(key(KeyCode::Char('a'))), FilterAction::Changed("a".into()));
        assert_eq!(f.handle_key(key(KeyCode::Char('b'))), FilterAction::Changed("ab".into()));
        assert_eq!(f.handle_key(key(KeyCode::Backspace)), FilterAction::Changed("a".into()));
    }

    #[test]
    fn test_escape_clears_then_closes() {
        let mut f = FilterInput::new("name…");
        f.activate();
        f.handle_key(key(KeyCode::Char('x')));
        assert_eq!(f.handle_key(key(KeyCode::Esc)), FilterAction::Changed(String::new()));
        assert!(f.is_active());
        assert_eq!(f.handle_key(key(KeyCode::Esc)), FilterAction::Cancelled);
        assert!(!f.is_active());
    }

    #[test]
    fn test_enter_keeps_query() {
        let mut f = FilterInput::new("name…");
        f.activate();
        f.handle_key(key(KeyCode::Char('q')));
        assert_eq!(f.handle_key(key(KeyCode::Enter)), FilterAction::Confirmed);
        assert_eq!(f.text(), "q");
    }
}
