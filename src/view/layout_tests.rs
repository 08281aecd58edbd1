//! Tests for screen layout rendering.

use super::*;
use crate::model::{
    ContinuationToken, LargeEvent, LargeEventKind, LivingDocViewModel, RevisionPage,
    SectionHeader, SectionId, SmallEvent, TypedEvent, UserInfo,
};
use crate::view::styles::{ColorConfig, ThemeName};
use crate::view_state::render::{EstimateDefaults, EventRenderAdapter};
use chrono::{TimeZone, Utc};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Test Helpers =====

fn large(rev: u64, delta: i64) -> TypedEvent {
    TypedEvent::Large(LargeEvent {
        revision_id: rev,
        timestamp: Utc.with_ymd_and_hms(2020, 10, 16, 14, 5, 0).unwrap(),
        user: UserInfo {
            name: "Editor".to_string(),
            edit_count: Some(42),
            anonymous: false,
        },
        kind: LargeEventKind::AddedText,
        summary: Some("Expanded history".to_string()),
        byte_delta: delta,
    })
}

fn view_model(next: u64) -> LivingDocViewModel {
    LivingDocViewModel {
        article_title: Some("Dog".to_string()),
        summary_text: Some("12 edits in the last 30 days".to_string()),
        edit_metrics: vec![1, 3, 0, 5],
        sections: vec![SectionHeader::new(
            SectionId::new("2020-10-16").unwrap(),
            "October 16, 2020",
            vec![
                large(10, 1240),
                TypedEvent::Small(SmallEvent::new(vec![9, 8]).unwrap()),
            ],
        )],
        next_rv_start_id: ContinuationToken::new(next),
    }
}

fn state(next: u64, width: u16, height: u16) -> AppState {
    let mut state = AppState::detached(
        &view_model(next),
        EventRenderAdapter::with_default_cells(EstimateDefaults::default()),
        ThemeName::Light,
        ColorConfig::enabled(),
    );
    let areas = ScreenAreas::split(Rect::new(0, 0, width, height));
    state.set_viewport(areas.timeline_viewport());
    state
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// ===== ScreenAreas =====

#[test]
fn split_reserves_header_and_status() {
    let areas = ScreenAreas::split(Rect::new(0, 0, 80, 24));

    assert_eq!(areas.header.height, HEADER_HEIGHT);
    assert_eq!(areas.status.height, STATUS_BAR_HEIGHT);
    assert_eq!(areas.timeline.height, 24 - HEADER_HEIGHT - STATUS_BAR_HEIGHT);
    assert_eq!(areas.timeline.y, HEADER_HEIGHT);
}

#[test]
fn timeline_viewport_matches_timeline_area() {
    let areas = ScreenAreas::split(Rect::new(0, 0, 60, 20));
    assert_eq!(
        areas.timeline_viewport(),
        Viewport {
            width: 60,
            height: 14
        }
    );
}

#[test]
fn tiny_terminal_gives_empty_timeline() {
    let areas = ScreenAreas::split(Rect::new(0, 0, 40, 4));
    assert_eq!(areas.timeline.height, 0);
}

// ===== Status =====

#[test]
fn status_reports_counts_and_end_of_history() {
    let state = state(0, 80, 24);
    assert_eq!(
        status_text(&state),
        "1 section · 2 events | End of history | t: theme | q: quit"
    );
}

#[test]
fn status_without_loading_or_end() {
    // Detached: the trigger never fires so nothing is pending.
    let state = state(77, 80, 24);
    assert_eq!(status_text(&state), "1 section · 2 events | t: theme | q: quit");
}

#[test]
fn status_counts_events_added_by_latest_page() {
    let mut state = state(77, 80, 24);
    state.append_page(RevisionPage {
        rv_start_id: ContinuationToken::new(77),
        sections: vec![SectionHeader::new(
            SectionId::new("2020-10-15").unwrap(),
            "October 15, 2020",
            vec![
                large(7, -30),
                TypedEvent::Small(SmallEvent::new(vec![6]).unwrap()),
            ],
        )],
        next_rv_start_id: ContinuationToken::new(0),
        article_title: None,
        summary_text: None,
        edit_metrics: None,
    });

    assert_eq!(
        status_text(&state),
        "2 sections · 4 events | +2 new | End of history | t: theme | q: quit"
    );
}

#[test]
fn empty_page_clears_added_count() {
    let mut state = state(77, 80, 24);
    let empty = |start, next| RevisionPage {
        rv_start_id: ContinuationToken::new(start),
        sections: Vec::new(),
        next_rv_start_id: ContinuationToken::new(next),
        article_title: None,
        summary_text: None,
        edit_metrics: None,
    };
    state.append_page(RevisionPage {
        sections: vec![SectionHeader::new(
            SectionId::new("2020-10-16").unwrap(),
            "October 16, 2020",
            vec![TypedEvent::Small(SmallEvent::new(vec![5]).unwrap())],
        )],
        ..empty(77, 60)
    });
    assert!(status_text(&state).contains("+1 new"));

    state.append_page(empty(60, 50));
    assert!(!status_text(&state).contains("new"));
}

// ===== Timeline =====

#[test]
fn timeline_lines_fill_at_most_viewport() {
    let state = state(0, 80, 10);
    let lines = timeline_lines(&state, &state.theme());
    assert!(lines.len() <= usize::from(state.viewport().height));
    assert!(!lines.is_empty());
}

#[test]
fn timeline_lines_cover_whole_short_feed() {
    let state = state(0, 80, 40);
    let lines = timeline_lines(&state, &state.theme());
    assert_eq!(lines.len(), state.layout().total_height());
}

#[test]
fn scrolling_shifts_timeline_lines() {
    let mut state = state(0, 80, 10);
    let theme = state.theme();
    let before = timeline_lines(&state, &theme);

    state.handle_action(crate::model::KeyAction::ScrollDown);
    let after = timeline_lines(&state, &theme);

    assert_eq!(before[1], after[0]);
}

// ===== Full render =====

#[test]
fn render_layout_draws_header_timeline_and_status() {
    let state = state(0, 60, 24);
    let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();

    terminal
        .draw(|frame| render_layout(frame, &state))
        .unwrap();
    let text = buffer_text(&terminal);

    assert!(text.contains("RECENT CHANGES"));
    assert!(text.contains("Dog"));
    assert!(text.contains("12 edits in the last 30 days"));
    assert!(text.contains("October 16, 2020"));
    assert!(text.contains("Text added"));
    assert!(text.contains("+1,240 bytes"));
    assert!(text.contains("2 small changes made"));
    assert!(text.contains("End of history"));
    assert!(!text.contains("new"));
}

#[test]
fn render_layout_shows_added_count_after_page() {
    let mut state = state(77, 80, 24);
    state.append_page(RevisionPage {
        rv_start_id: ContinuationToken::new(77),
        sections: vec![SectionHeader::new(
            SectionId::new("2020-10-16").unwrap(),
            "October 16, 2020",
            vec![TypedEvent::Small(SmallEvent::new(vec![7, 6]).unwrap())],
        )],
        next_rv_start_id: ContinuationToken::new(0),
        article_title: None,
        summary_text: None,
        edit_metrics: None,
    });
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    terminal
        .draw(|frame| render_layout(frame, &state))
        .unwrap();

    assert!(buffer_text(&terminal).contains("+1 new"));
}

#[test]
fn render_layout_survives_tiny_terminal() {
    let state = state(0, 10, 3);
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();

    let result = terminal.draw(|frame| render_layout(frame, &state));

    assert!(result.is_ok());
}
