//! Section/event state for the timeline with incremental append.
//!
//! The store owns the current [`Snapshot`] and the last-known continuation token.
//! Every mutation builds a complete new snapshot and swaps it in, then reports the
//! [`SnapshotDiff`] so the renderer can animate insertions.

use super::reconcile::{diff_snapshots, SnapshotDiff};
use super::snapshot::{Snapshot, SnapshotBuilder};
use crate::model::{ContinuationToken, LivingDocViewModel, RevisionPage, SectionHeader};
use std::sync::Arc;
use tracing::{debug, warn};

/// Holds the ordered sections of the timeline.
///
/// Lives for the lifetime of the screen; must only be mutated from the owning thread.
#[derive(Debug, Clone, Default)]
pub struct FeedStateStore {
    snapshot: Arc<Snapshot>,
    next_rv_start_id: ContinuationToken,
}

impl FeedStateStore {
    /// Empty store with a terminal token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Cheap to clone; never changes after being handed out.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Last-known continuation token.
    pub fn continuation_token(&self) -> ContinuationToken {
        self.next_rv_start_id
    }

    /// True when no further pages can be requested.
    pub fn is_exhausted(&self) -> bool {
        self.next_rv_start_id.is_terminal()
    }

    /// First load: replace all state with the view model's sections and token.
    pub fn add_initial_page(&mut self, view_model: &LivingDocViewModel) -> SnapshotDiff {
        self.next_rv_start_id = view_model.next_rv_start_id;
        self.add_initial_sections(view_model.sections.clone())
    }

    /// Merge a later page and record its continuation token.
    pub fn append_page(&mut self, page: RevisionPage) -> SnapshotDiff {
        self.next_rv_start_id = page.next_rv_start_id;
        self.append_sections(page.sections)
    }

    /// Replace current state wholesale with `sections`, in order.
    ///
    /// Sections repeating an identity are coalesced into the first occurrence.
    pub fn add_initial_sections(&mut self, sections: Vec<SectionHeader>) -> SnapshotDiff {
        let mut builder = SnapshotBuilder::new();
        for section in &sections {
            builder.append_section(section);
        }
        for section in &sections {
            append_events(&mut builder, section);
        }
        self.apply(builder.build())
    }

    /// Merge an incremental page.
    ///
    /// Sections whose identity is already present receive the incoming events after
    /// their existing ones; all other sections are appended at the end in input order.
    pub fn append_sections(&mut self, sections: Vec<SectionHeader>) -> SnapshotDiff {
        let mut builder = SnapshotBuilder::from_snapshot(&self.snapshot);
        let mut merged = vec![false; sections.len()];

        for current in builder.section_ids() {
            for (index, proposed) in sections.iter().enumerate() {
                if proposed.id == current {
                    append_events(&mut builder, proposed);
                    merged[index] = true;
                }
            }
        }

        for (section, _) in sections.iter().zip(&merged).filter(|(_, merged)| !**merged) {
            builder.append_section(section);
            append_events(&mut builder, section);
        }

        self.apply(builder.build())
    }

    fn apply(&mut self, snapshot: Snapshot) -> SnapshotDiff {
        let diff = diff_snapshots(&self.snapshot, &snapshot);
        debug!(
            sections = snapshot.number_of_sections(),
            items = snapshot.total_items(),
            inserted_sections = diff.inserted_sections(),
            inserted_items = diff.inserted_items,
            "Applied snapshot"
        );
        self.snapshot = Arc::new(snapshot);
        diff
    }
}

fn append_events(builder: &mut SnapshotBuilder, section: &SectionHeader) {
    let outcome = builder.append_items(&section.events, &section.id);
    if outcome.duplicates > 0 {
        warn!(
            section = %section.id,
            duplicates = outcome.duplicates,
            "Dropped events already present in section"
        );
    }
}

#[cfg(test)]
#[path = "feed_store_tests.rs"]
mod tests;
