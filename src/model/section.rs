//! Timeline sections: a dated group of events keyed by a stable identity.

use super::event::TypedEvent;
use super::identifiers::SectionId;
use serde::Deserialize;
use std::hash::{Hash, Hasher};

/// A titled group of events.
///
/// Equality and hashing consider only `id`, so a section arriving on a later
/// page compares equal to the already-loaded section with the same day key.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionHeader {
    /// Stable identity, one per day.
    pub id: SectionId,
    /// Display title, e.g. "October 16, 2020".
    pub title: String,
    /// Secondary line, e.g. "3 edits".
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Collapsed sections lay out only their header.
    #[serde(default)]
    pub collapsed: bool,
    /// Events in display order, newest first.
    #[serde(default)]
    pub events: Vec<TypedEvent>,
}

impl SectionHeader {
    /// Expanded section without a subtitle.
    pub fn new(id: SectionId, title: impl Into<String>, events: Vec<TypedEvent>) -> Self {
        Self {
            id,
            title: title.into(),
            subtitle: None,
            collapsed: false,
            events,
        }
    }

    /// Set the secondary line.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

impl PartialEq for SectionHeader {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SectionHeader {}

impl Hash for SectionHeader {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
