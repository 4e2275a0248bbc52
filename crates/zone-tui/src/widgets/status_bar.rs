//! Status bar — the summary line at the top and the keys bar at the bottom.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{
    C_ACCENT, C_DAILY, C_LOADING, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_OPEN, C_PRIMARY,
    C_SECONDARY,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Filter,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
        }
    }
}

/// What the summary line reports about the catalog.
pub struct Summary<'a> {
    pub count_label: &'a str,
    pub sort_label: &'a str,
    pub zone_of_the_day: Option<&'a str>,
    pub loading: bool,
    pub failed: bool,
    pub open_zone: Option<&'a str>,
}

/// One row: app name, catalog state, count, sort key, entry of the day.
pub fn draw_summary_bar(frame: &mut Frame, area: Rect, summary: &Summary) {
    let (dot, dot_color) = if summary.failed {
        ("●", C_ACCENT)
    } else if summary.loading {
        ("●", C_LOADING)
    } else {
        ("●", C_OPEN)
    };

    let mut spans = vec![
        Span::styled(" zones ", Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)),
        Span::styled(dot, Style::default().fg(dot_color)),
        Span::raw("  "),
        Span::styled(summary.count_label.to_string(), Style::default().fg(C_SECONDARY)),
        Span::styled("  sort: ", Style::default().fg(C_MUTED)),
        Span::styled(summary.sort_label.to_string(), Style::default().fg(C_SECONDARY)),
    ];
    if let Some(name) = summary.zone_of_the_day {
        spans.push(Span::styled("  ★ zone of the day: ", Style::default().fg(C_DAILY)));
        spans.push(Span::styled(name.to_string(), Style::default().fg(C_PRIMARY)));
    }
    if let Some(name) = summary.open_zone {
        spans.push(Span::styled("  ▶ ", Style::default().fg(C_OPEN)));
        spans.push(Span::styled(name.to_string(), Style::default().fg(C_OPEN)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, viewer_visible: bool) {
    let keys = match mode {
        InputMode::Normal if viewer_visible => {
            " ↑↓/jk select  Enter/o open  c close  n new window  b browser  F maximize  s/S sort  / search  Tab panes  ? help  q quit"
        }
        InputMode::Normal => {
            " ↑↓/jk select  Enter/o open  s/S sort  / search  y copy url  R reload  L logs  ? help  q quit"
        }
        InputMode::Filter => " type to search  ↑↓ move  Enter keep  Esc clear+close  Tab next pane",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
