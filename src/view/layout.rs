//! Screen layout rendering.
//!
//! Splits the frame into article header, timeline and status bar, and draws each from
//! `AppState`. Area calculation is pure so the shell can size the timeline viewport
//! before drawing.

use super::constants::{HEADER_HEIGHT, SCREEN_LABEL, STATUS_BAR_HEIGHT};
use crate::state::{AppState, Viewport};
use crate::view::styles::Theme;
use crate::view_state::layout::RowKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

/// Areas of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Label, article title, summary and sparkline.
    pub header: Rect,
    /// Scrolling timeline.
    pub timeline: Rect,
    /// One-line status bar.
    pub status: Rect,
}

impl ScreenAreas {
    /// Split `area` vertically: header, timeline (flexible), status bar.
    pub fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);

        Self {
            header: chunks[0],
            timeline: chunks[1],
            status: chunks[2],
        }
    }

    /// Viewport handed to `AppState` for the timeline.
    pub fn timeline_viewport(&self) -> Viewport {
        Viewport {
            width: self.timeline.width,
            height: self.timeline.height,
        }
    }
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &AppState) {
    let theme = state.theme();
    let areas = ScreenAreas::split(frame.area());

    frame.render_widget(Block::default().style(theme.base()), frame.area());
    render_header(frame, areas.header, state, &theme);
    render_timeline(frame, areas.timeline, state, &theme);
    render_status_bar(frame, areas.status, state, &theme);
}

/// Render the article header: screen label, title, summary and edit activity.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.secondary())
        .style(Style::default().bg(theme.header_background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let header = &state.header;
    let lines = vec![
        Line::from(Span::styled(
            SCREEN_LABEL,
            theme.secondary().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            header.title.clone().unwrap_or_default(),
            theme.title(),
        )),
        Line::from(Span::styled(
            header.summary.clone().unwrap_or_default(),
            theme.secondary(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    if !header.edit_metrics.is_empty() {
        let sparkline = Sparkline::default()
            .data(&header.edit_metrics)
            .style(theme.accent());
        frame.render_widget(sparkline, chunks[1]);
    }
}

/// Lines of the timeline currently in view.
///
/// Each visible row is rendered through the adapter and clipped or padded to its laid
/// out height, so the drawn lines always agree with the layout the scroll offset was
/// computed against. Rows without a descriptor render as blank space.
pub fn timeline_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let snapshot = state.snapshot();
    let layout = state.layout();
    let adapter = state.adapter();
    let visible = state.visible_rows();
    let width = layout.width();

    let mut lines = Vec::new();
    for row in &layout.rows()[visible.rows.clone()] {
        let rendered = match row.kind {
            RowKind::Header { section } => adapter.render_header(&snapshot, section, width, theme),
            RowKind::Item(path) => adapter.render_item(&snapshot, path, width, theme),
        };
        let mut row_lines = rendered.unwrap_or_default();
        row_lines.resize(usize::from(row.height), Line::default());
        lines.extend(row_lines);
    }

    lines
        .into_iter()
        .skip(visible.skip)
        .take(usize::from(state.viewport().height))
        .collect()
}

fn render_timeline(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let paragraph = Paragraph::new(timeline_lines(state, theme)).style(theme.base());
    frame.render_widget(paragraph, area);
}

/// Status text: loaded counts, events added by the latest page, then the loading or
/// end-of-history state.
pub fn status_text(state: &AppState) -> String {
    let snapshot = state.snapshot();
    let sections = snapshot.number_of_sections();
    let events = snapshot.total_items();

    let added = match state.latest_page().inserted_items {
        0 => String::new(),
        n => format!(" | +{n} new"),
    };

    let progress = if state.is_loading() {
        " | Loading more…"
    } else if state.is_exhausted() {
        " | End of history"
    } else {
        ""
    };

    format!(
        "{} {} · {} {}{}{} | t: theme | q: quit",
        sections,
        plural(sections, "section", "sections"),
        events,
        plural(events, "event", "events"),
        added,
        progress
    )
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let style = if state.is_loading() {
        theme.accent()
    } else {
        theme.secondary()
    };
    let paragraph = Paragraph::new(Line::from(status_text(state))).style(style);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
