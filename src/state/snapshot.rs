//! Immutable section/event snapshot handed to the renderer.
//!
//! A [`Snapshot`] is never mutated after it is built. The store swaps in a new
//! `Arc<Snapshot>` wholesale, so a renderer holding the previous one always sees a
//! consistent state.

use crate::model::{EventId, SectionHeader, SectionId, TypedEvent};
use std::collections::{HashMap, HashSet};

/// Position of an item: section index, then item index within the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPath {
    /// Section index.
    pub section: usize,
    /// Item index within the section.
    pub item: usize,
}

impl ItemPath {
    /// Path to item `item` of section `section`.
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Ordered projection of sections to their ordered events.
///
/// # Invariants
/// - Section identities are unique.
/// - Event identities are unique within a section.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    sections: Vec<SectionHeader>,
}

impl Snapshot {
    /// Snapshot with no sections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections.
    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    /// Number of items in `section`, 0 when out of range.
    pub fn number_of_items(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.events.len())
    }

    /// Number of items across all sections.
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(|s| s.events.len()).sum()
    }

    /// All sections in order.
    pub fn sections(&self) -> &[SectionHeader] {
        &self.sections
    }

    /// Section at `index`.
    pub fn section(&self, index: usize) -> Option<&SectionHeader> {
        self.sections.get(index)
    }

    /// Item at `path`.
    pub fn item(&self, path: ItemPath) -> Option<&TypedEvent> {
        self.sections
            .get(path.section)
            .and_then(|s| s.events.get(path.item))
    }

    /// Section identities in order.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    /// Item identities of section `section`. Empty when out of range.
    pub fn item_ids(&self, section: usize) -> Vec<EventId> {
        self.sections
            .get(section)
            .map(|s| s.events.iter().map(TypedEvent::id).collect())
            .unwrap_or_default()
    }

    /// Path of the last item of the last section.
    ///
    /// `None` when the snapshot is empty or its last section has no items.
    pub fn last_item_path(&self) -> Option<ItemPath> {
        let section = self.sections.len().checked_sub(1)?;
        let item = self.sections[section].events.len().checked_sub(1)?;
        Some(ItemPath::new(section, item))
    }
}

/// Result of appending items to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppendOutcome {
    /// Items added to the section.
    pub appended: usize,
    /// Items skipped because their identity was already in the section.
    pub duplicates: usize,
}

/// Mutable staging area producing a new [`Snapshot`].
///
/// Mirrors the diffable-snapshot API: sections are appended as bare identities,
/// items are appended to a section by identity.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    sections: Vec<SectionHeader>,
    positions: HashMap<SectionId, usize>,
    item_ids: Vec<HashSet<EventId>>,
}

impl SnapshotBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the contents of an existing snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut builder = Self::new();
        for section in snapshot.sections() {
            builder.append_section(section);
            builder.append_items(&section.events, &section.id);
        }
        builder
    }

    /// Identities of the sections staged so far, in order.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    /// Append a section without its events.
    ///
    /// Returns `false` (and changes nothing) when the identity is already present.
    pub fn append_section(&mut self, section: &SectionHeader) -> bool {
        if self.positions.contains_key(&section.id) {
            return false;
        }
        self.positions.insert(section.id.clone(), self.sections.len());
        self.sections.push(SectionHeader {
            id: section.id.clone(),
            title: section.title.clone(),
            subtitle: section.subtitle.clone(),
            collapsed: section.collapsed,
            events: Vec::new(),
        });
        self.item_ids.push(HashSet::new());
        true
    }

    /// Append events to the end of section `to`, skipping identities already present.
    ///
    /// Appending to an unknown section is a no-op.
    pub fn append_items(&mut self, events: &[TypedEvent], to: &SectionId) -> AppendOutcome {
        let mut outcome = AppendOutcome::default();
        let Some(&position) = self.positions.get(to) else {
            return outcome;
        };

        let ids = &mut self.item_ids[position];
        let target = &mut self.sections[position].events;
        for event in events {
            if ids.insert(event.id()) {
                target.push(event.clone());
                outcome.appended += 1;
            } else {
                outcome.duplicates += 1;
            }
        }
        outcome
    }

    /// Freeze the staged sections into a snapshot.
    pub fn build(self) -> Snapshot {
        Snapshot {
            sections: self.sections,
        }
    }
}
