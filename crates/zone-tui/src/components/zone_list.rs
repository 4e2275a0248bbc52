//! ZoneList component — the gallery pane.
//!
//! Rows follow the catalog order; the search query only hides rows. Every
//! row has two ways to open its zone: activating the row itself (Enter or a
//! double-click) and the `▶` control in the first column (`o` or a single
//! click on the marker).

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use zone_core::catalog::name_matches;
use zone_core::template::ContentTarget;
use zone_core::ZoneRecord;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        C_ACCENT, C_DAILY, C_HITS, C_LINK, C_MUTED, C_OPEN, C_PRIMARY, C_SECONDARY,
        C_SELECTION_BG,
    },
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

/// Width of the `▶` control column, including its padding.
const CONTROL_WIDTH: u16 = 3;
const DOUBLE_CLICK_MS: u128 = 400;

pub struct ZoneList {
    pub list: ScrollableList<ZoneRecord>,
    pub filter_input: FilterInput,
    list_state: ListState,
    /// (row, time) of the last plain row click, for double-click detection.
    last_click: Option<(usize, Instant)>,
}

impl ZoneList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(|zone: &ZoneRecord, q: &str| name_matches(zone, q)),
            filter_input: FilterInput::new("zone name…"),
            list_state: ListState::default(),
            last_click: None,
        }
    }

    /// Reload rows from the catalog, keeping the selected zone if it survives.
    pub fn sync(&mut self, state: &AppState) {
        let selected = self.selected_id();
        let zones = state
            .catalog
            .catalog()
            .map(|c| c.zones().to_vec())
            .unwrap_or_default();
        self.list.filter = state.query.clone();
        self.list.set_items(zones);
        match selected {
            Some(id) => {
                if !self.list.select_where(|z| z.id == id) {
                    self.list.select_first();
                }
            }
            None => self.list.select_first(),
        }
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.list.selected_item().map(|z| z.id)
    }

    fn open_selected(&self) -> Vec<Action> {
        self.selected_id().map(Action::Open).into_iter().collect()
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match key.code {
            KeyCode::Up => {
                self.list.select_up(1);
                return vec![];
            }
            KeyCode::Down => {
                self.list.select_down(1);
                return vec![];
            }
            _ => {}
        }
        match self.filter_input.handle_key(key) {
            FilterAction::Changed(q) => {
                self.list.set_filter(&q);
                vec![Action::FilterChanged(q)]
            }
            FilterAction::Confirmed => vec![Action::CloseFilter],
            FilterAction::Cancelled => {
                self.list.set_filter("");
                vec![Action::FilterChanged(String::new()), Action::CloseFilter]
            }
        }
    }

    fn render_row<'a>(
        &self,
        zone: &'a ZoneRecord,
        is_selected: bool,
        width: u16,
        state: &AppState,
        daily_id: Option<i64>,
    ) -> ListItem<'a> {
        let is_open = state.viewer.visible && state.viewer.id == Some(zone.id);
        let is_pending = state.viewer.pending.as_deref() == Some(zone.name.as_str());
        let is_external = matches!(
            state.endpoints.content_target(zone),
            ContentTarget::External(_)
        );

        let control_color = if is_open {
            C_OPEN
        } else if is_selected {
            C_PRIMARY
        } else {
            C_MUTED
        };
        let control = if is_pending { "⋯" } else { "▶" };

        let mut spans = vec![
            Span::styled(format!(" {} ", control), Style::default().fg(control_color)),
            Span::styled(format!("{:>5} ", zone.id), Style::default().fg(C_MUTED)),
        ];
        let mut used = CONTROL_WIDTH as usize + 6;

        if zone.is_sentinel() {
            spans.push(Span::styled("◆ ", Style::default().fg(C_ACCENT)));
            used += 2;
        }

        let mut suffix: Vec<Span> = Vec::new();
        let mut suffix_w = 0;
        if daily_id == Some(zone.id) {
            suffix.push(Span::styled(" ★", Style::default().fg(C_DAILY)));
            suffix_w += 2;
        }
        if is_external {
            suffix.push(Span::styled(" ↗", Style::default().fg(C_LINK)));
            suffix_w += 2;
        }
        if let Some(hits) = state.hits(zone.id) {
            let text = format!("  {} hits", hits);
            suffix_w += text.width();
            suffix.push(Span::styled(text, Style::default().fg(C_HITS)));
        }

        let name_w = (width as usize).saturating_sub(used + suffix_w);
        let name_style = if is_open || is_selected {
            Style::default()
                .fg(if is_open { C_OPEN } else { C_PRIMARY })
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        spans.push(Span::styled(truncate(&zone.name, name_w), name_style));
        spans.extend(suffix);

        let row_style = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };
        ListItem::new(Line::from(spans)).style(row_style)
    }
}

impl Default for ZoneList {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `s` to at most `max` terminal columns, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if w + cw + 1 > max {
            break;
        }
        out.push(ch);
        w += cw;
    }
    if max > 0 {
        out.push('…');
    }
    out
}

impl Component for ZoneList {
    fn id(&self) -> ComponentId {
        ComponentId::ZoneList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.filter_input.is_active() {
            return self.handle_filter_key(key);
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Enter | KeyCode::Char('o') => return self.open_selected(),

            KeyCode::Esc if !state.query.is_empty() => return vec![Action::ClearFilter],
            KeyCode::Char('/') => {
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }
            KeyCode::Char('s') => return vec![Action::CycleSort],
            KeyCode::Char('S') => return vec![Action::CycleSortReverse],

            KeyCode::Char('t') => {
                if let Some(id) = state.gallery().zone_of_the_day.map(|z| z.id) {
                    self.list.select_where(|z| z.id == id);
                }
            }
            KeyCode::Char('y') => {
                if let Some(zone) = self.list.selected_item() {
                    let url = match state.endpoints.content_target(zone) {
                        ContentTarget::External(url) | ContentTarget::Embedded(url) => url,
                    };
                    return vec![Action::CopyToClipboard(url)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let first_row = area.y + 1;
        if event.row < first_row {
            return vec![];
        }
        let rel_row = (event.row - first_row) as usize;
        let show_filter = self.filter_input.is_active() || !self.list.filter.is_empty();
        let list_height = area.height.saturating_sub(2 + show_filter as u16) as usize;
        if rel_row >= list_height {
            return vec![];
        }
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let on_control =
                    event.column > area.x && event.column <= area.x + CONTROL_WIDTH;
                if on_control {
                    // The control opens on a single click and never counts
                    // toward a row double-click.
                    self.last_click = None;
                    if self.list.handle_click(rel_row) {
                        return self.open_selected();
                    }
                    return vec![];
                }

                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < DOUBLE_CLICK_MS)
                    .unwrap_or(false);
                if !self.list.handle_click(rel_row) {
                    self.last_click = None;
                    return vec![];
                }
                if is_double {
                    self.last_click = None;
                    return self.open_selected();
                }
                self.last_click = Some((rel_row, Instant::now()));
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::ClearFilter => {
                self.list.set_filter("");
                self.filter_input.clear();
                self.filter_input.deactivate();
            }
            Action::CloseFilter => self.filter_input.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let sort_label = state.sort_key.label();
        let block = pane_chrome(
            "zones",
            focused,
            Some(Badge {
                text: sort_label,
                color: C_SECONDARY,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let show_filter = self.filter_input.is_active() || !self.list.filter.is_empty();
        let list_area = Rect {
            height: inner.height.saturating_sub(show_filter as u16),
            ..inner
        };
        if show_filter && inner.height > 0 {
            let filter_area = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            self.filter_input.draw(frame, filter_area);
        }

        let gallery = state.gallery();
        if let Some(msg) = gallery.message() {
            let color = if matches!(gallery.gallery, zone_core::view::Gallery::Failed(_)) {
                C_ACCENT
            } else {
                C_MUTED
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {}", msg), Style::default().fg(color))),
                list_area,
            );
            return;
        }
        let daily_id = gallery.zone_of_the_day.map(|z| z.id);

        let content_h = list_area.height as usize;
        self.list.ensure_visible(content_h);
        let sel_in_view = self.list.selected_in_view();
        let items: Vec<ListItem> = self
            .list
            .visible_items(content_h)
            .into_iter()
            .enumerate()
            .map(|(row, (_, zone))| {
                self.render_row(zone, row == sel_in_view, list_area.width, state, daily_id)
            })
            .collect();

        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(List::new(items), list_area, &mut self.list_state);
    }
}
