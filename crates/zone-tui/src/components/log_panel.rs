//! LogPanel component — warnings and errors from zones.log.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_LOADING, C_MUTED},
    widgets::pane_chrome::pane_chrome_borders,
};

/// Lines kept from the tail of the log file.
pub const LOG_TAIL: usize = 500;

pub struct LogPanel {
    pub visible: bool,
    /// Top line shown; `usize::MAX` pins the view to the newest entry.
    scroll: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            visible: false,
            scroll: usize::MAX,
        }
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// WARN and ERROR lines from the tail of a tracing log file.
pub fn warnings_from_log(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content
        .lines()
        .filter(|l| {
            let l = strip_ansi(l);
            l.contains(" WARN ") || l.contains(" ERROR ")
        })
        .collect();
    let start = lines.len().saturating_sub(LOG_TAIL);
    lines[start..].iter().map(|l| l.to_string()).collect()
}

impl Component for LogPanel {
    fn id(&self) -> ComponentId {
        ComponentId::LogPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleLogs = action {
            self.visible = !self.visible;
            self.scroll = usize::MAX;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);
        // The body panes above already draw their bottom edge.
        let block = pane_chrome_borders("log", focused, None, Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let logs = &state.log_lines;
        if logs.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no warnings", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        let max_scroll = logs.len().saturating_sub(height);
        self.scroll = self.scroll.min(max_scroll);

        let lines: Vec<Line> = logs
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|raw| {
                let text = compact_log_line(raw);
                let color = if text.contains("ERROR") { C_ACCENT } else { C_LOADING };
                Line::from(vec![Span::raw(" "), Span::styled(text, Style::default().fg(color))])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Log line formatting ───────────────────────────────────────────────────────

/// `2024-03-09T10:00:00.123Z  WARN zone_core::loader: msg` -> `10:00:00 WARN msg`
fn compact_log_line(raw: &str) -> String {
    let clean = strip_ansi(raw);
    let mut rest = clean.trim();
    let mut head: Vec<String> = Vec::new();

    if let Some((tok, rem)) = split_first_token(rest) {
        if let Some(ts) = compact_timestamp(tok) {
            head.push(ts);
            rest = rem.trim_start();
        }
    }
    if let Some((tok, rem)) = split_first_token(rest) {
        if matches!(tok, "TRACE" | "DEBUG" | "INFO" | "WARN" | "ERROR") {
            head.push(tok.to_string());
            rest = rem.trim_start();
        }
    }
    if let Some((target, msg)) = rest.split_once(": ") {
        let is_module_path = !target.is_empty()
            && target
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':'));
        if is_module_path {
            rest = msg.trim_start();
        }
    }

    head.push(rest.to_string());
    head.retain(|s| !s.is_empty());
    head.join(" ")
}

fn compact_timestamp(token: &str) -> Option<String> {
    let dt = chrono::DateTime::parse_from_rfc3339(token).ok()?;
    Some(dt.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
}

fn split_first_token(s: &str) -> Option<(&str, &str)> {
    let mut parts = s.splitn(2, char::is_whitespace);
    let first = parts.next().filter(|t| !t.is_empty())?;
    Some((first, parts.next().unwrap_or("")))
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\u{1b}' {
            out.push(ch);
            continue;
        }
        // CSI sequence: ESC [ params... final byte in '@'..='~'
        if chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        } else {
            chars.next();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_from_log_keeps_only_warn_and_error() {
        let log = "\
2024-03-09T10:00:00.000000Z  INFO zone_core::loader: catalog loaded
2024-03-09T10:00:01.000000Z  WARN zone_core::loader: popularity data unavailable
2024-03-09T10:00:02.000000Z ERROR zones::app: Failed to load zone: HTTP error! status: 404
";
        let lines = warnings_from_log(log);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("popularity"));
    }

    #[test]
    fn test_compact_log_line_strips_target() {
        let line = compact_log_line("2024-03-09T10:00:01Z  WARN zone_core::loader: no stats");
        assert!(line.ends_with("WARN no stats"), "{}", line);
        assert_eq!(compact_log_line("plain text"), "plain text");
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\u{1b}[33mWARN\u{1b}[0m x"), "WARN x");
    }
}
