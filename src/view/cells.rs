//! Built-in timeline cells: large event, small event, section header.

use crate::model::{LargeEvent, SectionHeader, SmallEvent};
use crate::view::styles::Theme;
use crate::view_state::render::{CellContent, CellDescriptor, CellKind};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns taken by the timeline rail in front of every item line.
pub const GUTTER_WIDTH: u16 = 2;

const DOT_LARGE: &str = "● ";
const DOT_SMALL: &str = "○ ";
const RAIL: &str = "│ ";
const COLLAPSED_MARKER: &str = "▸ ";

// ===== LargeEventCell =====

/// Full card for a significant revision.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargeEventCell;

impl CellDescriptor for LargeEventCell {
    fn kind(&self) -> CellKind {
        CellKind::LargeEvent
    }

    fn render(&self, content: CellContent<'_>, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        match content {
            CellContent::Large(event) => large_lines(event, width, theme),
            _ => Vec::new(),
        }
    }
}

fn large_lines(event: &LargeEvent, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let text_width = content_width(width);
    let mut lines = Vec::new();

    for (i, chunk) in wrap_text(event.kind.label(), text_width).into_iter().enumerate() {
        let marker = if i == 0 { DOT_LARGE } else { RAIL };
        lines.push(Line::from(vec![
            Span::styled(marker, theme.accent()),
            Span::styled(chunk, theme.title()),
        ]));
    }

    lines.push(railed(format_delta(event.byte_delta), theme.delta(event.byte_delta), theme));

    if let Some(summary) = event.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        for chunk in wrap_text(summary, text_width) {
            lines.push(railed(chunk, theme.base(), theme));
        }
    }

    let byline = format!(
        "{} · {}",
        event.timestamp.format("%H:%M"),
        format_user(event)
    );
    for chunk in wrap_text(&byline, text_width) {
        lines.push(railed(chunk, theme.link(), theme));
    }

    lines.push(Line::from(Span::styled(RAIL.trim_end(), theme.accent())));
    lines
}

fn format_user(event: &LargeEvent) -> String {
    if event.user.anonymous {
        return format!("{} (anonymous)", event.user.name);
    }
    match event.user.edit_count {
        Some(count) => format!("{} ({} edits)", event.user.name, group_thousands(count)),
        None => event.user.name.clone(),
    }
}

/// "+1,240 bytes", "-52 bytes", "0 bytes".
pub fn format_delta(byte_delta: i64) -> String {
    let sign = match byte_delta.signum() {
        1 => "+",
        -1 => "-",
        _ => "",
    };
    format!("{sign}{} bytes", group_thousands(byte_delta.unsigned_abs()))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ===== SmallEventCell =====

/// Compact row standing for a run of minor revisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmallEventCell;

impl CellDescriptor for SmallEventCell {
    fn kind(&self) -> CellKind {
        CellKind::SmallEvent
    }

    fn render(&self, content: CellContent<'_>, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        match content {
            CellContent::Small(event) => small_lines(event, width, theme),
            _ => Vec::new(),
        }
    }
}

fn small_lines(event: &SmallEvent, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let text = match event.len() {
        1 => "1 small change made".to_string(),
        n => format!("{n} small changes made"),
    };
    let mut lines: Vec<Line<'static>> = wrap_text(&text, content_width(width))
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let marker = if i == 0 { DOT_SMALL } else { RAIL };
            Line::from(vec![
                Span::styled(marker, theme.accent()),
                Span::styled(chunk, theme.secondary().add_modifier(Modifier::ITALIC)),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(RAIL.trim_end(), theme.accent())));
    lines
}

// ===== SectionHeaderCell =====

/// Date heading that groups the events below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionHeaderCell;

impl CellDescriptor for SectionHeaderCell {
    fn kind(&self) -> CellKind {
        CellKind::SectionHeader
    }

    fn render(&self, content: CellContent<'_>, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        match content {
            CellContent::Header(header) => header_lines(header, width, theme),
            _ => Vec::new(),
        }
    }
}

fn header_lines(header: &SectionHeader, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let title = if header.collapsed {
        format!("{COLLAPSED_MARKER}{}", header.title)
    } else {
        header.title.clone()
    };
    let text_width = usize::from(width.max(1));
    let mut lines: Vec<Line<'static>> = wrap_text(&title, text_width)
        .into_iter()
        .map(|chunk| Line::from(Span::styled(chunk, theme.title())))
        .collect();
    if let Some(subtitle) = header.subtitle.as_deref().filter(|s| !s.is_empty()) {
        lines.extend(
            wrap_text(subtitle, text_width)
                .into_iter()
                .map(|chunk| Line::from(Span::styled(chunk, theme.secondary()))),
        );
    }
    lines
}

// ===== Helpers =====

fn content_width(width: u16) -> usize {
    usize::from(width.saturating_sub(GUTTER_WIDTH).max(1))
}

fn railed(text: String, style: ratatui::style::Style, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(RAIL, theme.accent()), Span::styled(text, style)])
}

/// Greedy word wrap by display width.
///
/// Words wider than `width` are split across lines. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() { word_width } else { current_width + 1 + word_width };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for c in word.chars() {
            let char_width = c.width().unwrap_or(0);
            if current_width + char_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += char_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
