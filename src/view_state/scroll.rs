//! Semantic scroll position over the feed.

use crate::model::KeyAction;

/// Scroll intent that survives relayout.
///
/// Resolved against the current content and viewport height; resolution clamps to
/// `[0, max(0, total_height - viewport_height)]` so the viewport is never blank
/// below the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    /// Pinned to the newest edits.
    #[default]
    Top,
    /// First visible line, clamped on resolve.
    AtLine(usize),
    /// Pinned to the oldest loaded edits.
    Bottom,
}

impl ScrollPosition {
    /// Absolute first visible line.
    ///
    /// ```
    /// # use livingdoc::view_state::scroll::ScrollPosition;
    /// assert_eq!(ScrollPosition::Bottom.resolve(100, 30), 70);
    /// assert_eq!(ScrollPosition::AtLine(95).resolve(100, 30), 70);
    /// assert_eq!(ScrollPosition::Bottom.resolve(10, 30), 0);
    /// ```
    pub fn resolve(self, total_height: usize, viewport_height: usize) -> usize {
        let max_offset = total_height.saturating_sub(viewport_height);
        match self {
            ScrollPosition::Top => 0,
            ScrollPosition::AtLine(line) => line.min(max_offset),
            ScrollPosition::Bottom => max_offset,
        }
    }

    /// Position after a scroll key. Non-scroll actions leave the position unchanged.
    ///
    /// Half-page actions move by half the viewport, at least one line.
    pub fn apply(self, action: KeyAction, total_height: usize, viewport_height: usize) -> Self {
        let offset = self.resolve(total_height, viewport_height);
        let half_page = (viewport_height / 2).max(1);
        let moved = match action {
            KeyAction::ScrollUp => offset.saturating_sub(1),
            KeyAction::ScrollDown => offset.saturating_add(1),
            KeyAction::PageUp => offset.saturating_sub(half_page),
            KeyAction::PageDown => offset.saturating_add(half_page),
            KeyAction::ScrollToTop => return ScrollPosition::Top,
            KeyAction::ScrollToBottom => return ScrollPosition::Bottom,
            _ => return self,
        };
        ScrollPosition::AtLine(moved).normalized(total_height, viewport_height)
    }

    fn normalized(self, total_height: usize, viewport_height: usize) -> Self {
        match self.resolve(total_height, viewport_height) {
            0 => ScrollPosition::Top,
            line => ScrollPosition::AtLine(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scroll_down_from_top_moves_one_line() {
        assert_eq!(
            ScrollPosition::Top.apply(KeyAction::ScrollDown, 100, 20),
            ScrollPosition::AtLine(1)
        );
    }

    #[test]
    fn scroll_up_at_top_stays_top() {
        assert_eq!(
            ScrollPosition::Top.apply(KeyAction::ScrollUp, 100, 20),
            ScrollPosition::Top
        );
    }

    #[test]
    fn page_down_moves_half_viewport() {
        assert_eq!(
            ScrollPosition::AtLine(10).apply(KeyAction::PageDown, 100, 20),
            ScrollPosition::AtLine(20)
        );
    }

    #[test]
    fn scroll_down_clamps_at_end() {
        assert_eq!(
            ScrollPosition::AtLine(80).apply(KeyAction::ScrollDown, 100, 20),
            ScrollPosition::AtLine(80)
        );
    }

    #[test]
    fn scroll_up_from_bottom_resolves_first() {
        assert_eq!(
            ScrollPosition::Bottom.apply(KeyAction::ScrollUp, 100, 20),
            ScrollPosition::AtLine(79)
        );
    }

    #[test]
    fn jump_actions() {
        let at = ScrollPosition::AtLine(40);
        assert_eq!(at.apply(KeyAction::ScrollToTop, 100, 20), ScrollPosition::Top);
        assert_eq!(at.apply(KeyAction::ScrollToBottom, 100, 20), ScrollPosition::Bottom);
    }

    #[test]
    fn non_scroll_action_is_ignored() {
        let at = ScrollPosition::AtLine(40);
        assert_eq!(at.apply(KeyAction::CycleTheme, 100, 20), at);
    }

    #[test]
    fn content_shorter_than_viewport_never_scrolls() {
        assert_eq!(
            ScrollPosition::Top.apply(KeyAction::PageDown, 10, 20),
            ScrollPosition::Top
        );
    }

    fn any_action() -> impl Strategy<Value = KeyAction> {
        prop_oneof![
            Just(KeyAction::ScrollUp),
            Just(KeyAction::ScrollDown),
            Just(KeyAction::PageUp),
            Just(KeyAction::PageDown),
            Just(KeyAction::ScrollToTop),
            Just(KeyAction::ScrollToBottom),
        ]
    }

    proptest! {
        #[test]
        fn resolved_offset_stays_in_bounds(
            actions in prop::collection::vec(any_action(), 0..40),
            total in 0usize..500,
            viewport in 1usize..60,
        ) {
            let mut position = ScrollPosition::Top;
            for action in actions {
                position = position.apply(action, total, viewport);
                prop_assert!(position.resolve(total, viewport) <= total.saturating_sub(viewport));
            }
        }
    }
}
