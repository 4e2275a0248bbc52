//! ZoneViewer component — the right pane.
//!
//! While a zone is open it shows the name/id labels, where the display
//! surface lives and the document itself. Otherwise it shows a card for the
//! zone of the day.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use zone_core::template::ContentTarget;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_DAILY, C_HITS, C_LINK, C_LOADING, C_MUTED, C_OPEN, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct ZoneViewerPane {
    scroll: usize,
    /// Id of the zone the scroll position belongs to.
    scrolled_for: Option<i64>,
}

impl ZoneViewerPane {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            scrolled_for: None,
        }
    }

    fn header_lines(state: &AppState) -> Vec<Line<'static>> {
        let viewer = &state.viewer;
        let mut lines = Vec::new();
        if let (Some(name), Some(id)) = (&viewer.name, viewer.id) {
            lines.push(Line::from(vec![
                Span::styled(
                    name.clone(),
                    Style::default().fg(C_OPEN).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  #{}", id), Style::default().fg(C_MUTED)),
            ]));
        }
        if let Some(loc) = &viewer.location {
            lines.push(label_line("surface", loc, C_LINK));
        }
        if let Some(url) = &state.served_at {
            lines.push(label_line("served at", url, C_LINK));
        }
        if let Some(doc) = &viewer.document {
            lines.push(label_line(
                "document",
                &format!("{} bytes, {} lines", doc.len(), doc.lines().count()),
                C_SECONDARY,
            ));
        }
        lines.push(Line::from(""));
        lines
    }

    fn draw_daily_card(frame: &mut Frame, inner: Rect, state: &AppState) {
        let gallery = state.gallery();
        let Some(zone) = gallery.zone_of_the_day else {
            let msg = gallery.message().unwrap_or_default();
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {}", msg), Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                " ★ zone of the day",
                Style::default().fg(C_DAILY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    zone.name.clone(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  #{}", zone.id), Style::default().fg(C_MUTED)),
            ]),
        ];
        if let Some(hits) = state.hits(zone.id) {
            lines.push(label_line("hits", &hits.to_string(), C_HITS));
        }
        let cover = state.endpoints.cover_url(zone);
        if !cover.is_empty() {
            lines.push(label_line("cover", &cover, C_LINK));
        }
        let target = match state.endpoints.content_target(zone) {
            ContentTarget::External(url) => format!("{} (opens in browser)", url),
            ContentTarget::Embedded(url) => url,
        };
        lines.push(label_line("content", &target, C_LINK));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {} · {}", state.today.format("%Y-%m-%d"), "Enter/o or click here to open"),
            Style::default().fg(C_MUTED),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Default for ZoneViewerPane {
    fn default() -> Self {
        Self::new()
    }
}

/// The daily card opens its zone the same way a gallery row does.
fn open_daily(state: &AppState) -> Vec<Action> {
    state
        .gallery()
        .zone_of_the_day
        .map(|z| Action::Open(z.id))
        .into_iter()
        .collect()
}

fn label_line(label: &str, value: &str, color: ratatui::style::Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<10}", label), Style::default().fg(C_MUTED)),
        Span::styled(value.to_string(), Style::default().fg(color)),
    ])
}

impl Component for ZoneViewerPane {
    fn id(&self) -> ComponentId {
        ComponentId::ZoneViewer
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if !state.viewer.visible {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('o') => open_daily(state),
                _ => vec![],
            };
        }
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('x') | KeyCode::Esc => return vec![Action::CloseZone],
            KeyCode::Char('n') => return vec![Action::OpenInNewContext],
            KeyCode::Char('b') => return vec![Action::ShowInBrowser],
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll += 1,
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll += 10,
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if !state.viewer.visible => {
                return open_daily(state)
            }
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(3),
            MouseEventKind::ScrollDown => self.scroll += 3,
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::CloseZone = action {
            self.scroll = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let viewer = &state.viewer;
        let title = if viewer.visible { "viewer" } else { "today" };
        let badge = if viewer.pending.is_some() {
            Some(Badge {
                text: "LOADING",
                color: C_LOADING,
            })
        } else if viewer.visible && state.maximized {
            Some(Badge {
                text: "MAX",
                color: C_SECONDARY,
            })
        } else {
            None
        };
        let block = pane_chrome(title, focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !viewer.visible {
            Self::draw_daily_card(frame, inner, state);
            return;
        }

        if self.scrolled_for != viewer.id {
            self.scroll = 0;
            self.scrolled_for = viewer.id;
        }

        let mut lines = Self::header_lines(state);
        let header_h = lines.len();
        let body_h = (inner.height as usize).saturating_sub(header_h);
        let doc_lines: Vec<&str> = viewer
            .document
            .as_deref()
            .map(|d| d.lines().collect())
            .unwrap_or_default();
        let max_scroll = doc_lines.len().saturating_sub(body_h);
        self.scroll = self.scroll.min(max_scroll);

        lines.extend(
            doc_lines
                .iter()
                .skip(self.scroll)
                .take(body_h)
                .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(C_SECONDARY)))),
        );
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventState, KeyModifiers};
    use std::path::PathBuf;
    use zone_core::popularity::PopularityIndex;
    use zone_core::template::Endpoints;
    use zone_core::view::CatalogState;
    use zone_core::{Catalog, SortKey, ZoneRecord};

    fn zone(id: i64, name: &str) -> ZoneRecord {
        ZoneRecord {
            id,
            name: name.to_string(),
            cover_template: String::new(),
            content_template: format!("{{HTML_URL}}/{}.html", id),
        }
    }

    fn state() -> AppState {
        let mut catalog = Catalog::new(
            vec![zone(10, "Alpha"), zone(11, "Beta"), zone(12, "Gamma")],
            PopularityIndex::default(),
        );
        catalog.sort_by(SortKey::Id);
        let mut state = AppState::new(
            SortKey::Id,
            Endpoints::new("https://c.test", "https://h.test"),
            PathBuf::from("/dev/null"),
        );
        state.catalog = CatalogState::Ready(catalog);
        state.today = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click() -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 12,
    };

    #[test]
    fn test_daily_card_opens_its_zone_once() {
        // 20240309 % 3 == 2 -> Gamma
        let s = state();
        let mut pane = ZoneViewerPane::new();
        assert_eq!(pane.handle_key(key(KeyCode::Enter), &s), vec![Action::Open(12)]);
        assert_eq!(pane.handle_key(key(KeyCode::Char('o')), &s), vec![Action::Open(12)]);
        assert_eq!(pane.handle_mouse(click(), AREA, &s), vec![Action::Open(12)]);
        assert!(pane.handle_key(key(KeyCode::Char('x')), &s).is_empty());
    }

    #[test]
    fn test_open_viewer_keys_do_not_reopen_daily() {
        let mut s = state();
        s.viewer.visible = true;
        s.viewer.id = Some(10);
        let mut pane = ZoneViewerPane::new();
        assert!(pane.handle_key(key(KeyCode::Enter), &s).is_empty());
        assert!(pane.handle_mouse(click(), AREA, &s).is_empty());
        assert_eq!(pane.handle_key(key(KeyCode::Esc), &s), vec![Action::CloseZone]);
    }

    #[test]
    fn test_no_catalog_no_daily_open() {
        let mut s = state();
        s.catalog = CatalogState::Loading;
        let mut pane = ZoneViewerPane::new();
        assert!(pane.handle_key(key(KeyCode::Enter), &s).is_empty());
        assert!(pane.handle_mouse(click(), AREA, &s).is_empty());
    }
}
