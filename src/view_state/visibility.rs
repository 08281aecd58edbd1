//! Tracks which items are on screen and reports the ones that just appeared.

use crate::state::snapshot::ItemPath;
use std::collections::HashSet;

/// Edge detector for item visibility.
///
/// An item is reported once when it enters the viewport and again only after it has
/// left and come back.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    shown: HashSet<ItemPath>,
}

impl VisibilityTracker {
    /// Tracker with nothing visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visible set and return items not visible before, in input order.
    pub fn update(&mut self, visible: impl IntoIterator<Item = ItemPath>) -> Vec<ItemPath> {
        let mut current = HashSet::new();
        let mut appeared = Vec::new();
        for path in visible {
            if current.insert(path) && !self.shown.contains(&path) {
                appeared.push(path);
            }
        }
        self.shown = current;
        appeared
    }
}
