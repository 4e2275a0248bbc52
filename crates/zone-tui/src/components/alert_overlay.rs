//! AlertOverlay — blocking message box. While visible it swallows every key
//! until dismissed.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_OVERLAY_BG, C_PRIMARY},
    widgets::pane_chrome::centered_rect,
};

#[derive(Default)]
pub struct AlertOverlay {
    message: Option<String>,
}

impl AlertOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Component for AlertOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::AlertOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_visible() {
            return vec![];
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                vec![Action::DismissAlert]
            }
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if self.is_visible() && matches!(event.kind, MouseEventKind::Down(_)) {
            return vec![Action::DismissAlert];
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::DismissAlert = action {
            self.message = None;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        let Some(message) = &self.message else {
            return;
        };
        let popup = centered_rect(60, 7, area);
        let lines = vec![
            Line::from(Span::styled(
                " alert",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(format!(" {}", message), Style::default().fg(C_PRIMARY))),
            Line::from(""),
            Line::from(Span::styled(" press Enter to dismiss", Style::default().fg(C_MUTED))),
        ];
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_ACCENT))
                        .style(Style::default().bg(C_OVERLAY_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventState, KeyModifiers};
    use std::path::PathBuf;
    use zone_core::template::Endpoints;
    use zone_core::SortKey;

    fn state() -> AppState {
        AppState::new(
            SortKey::Name,
            Endpoints::new("https://c.test", "https://h.test"),
            PathBuf::from("/dev/null"),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_alert_holds_message_until_dismissed() {
        let s = state();
        let mut alert = AlertOverlay::new();
        assert!(alert.handle_key(key(KeyCode::Enter), &s).is_empty());

        alert.show("Failed to load zone: HTTP 404");
        assert_eq!(alert.message(), Some("Failed to load zone: HTTP 404"));
        assert!(alert.handle_key(key(KeyCode::Char('j')), &s).is_empty());
        assert_eq!(alert.handle_key(key(KeyCode::Enter), &s), vec![Action::DismissAlert]);

        alert.on_action(&Action::DismissAlert, &s);
        assert!(!alert.is_visible());
        assert_eq!(alert.message(), None);
    }
}
