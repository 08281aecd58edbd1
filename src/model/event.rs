//! Timeline events: the tagged union rendered as one item each.

use super::identifiers::EventId;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry in the revision timeline.
///
/// Large events carry a single significant revision; small events group
/// consecutive minor revisions into one compact row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedEvent {
    /// A single significant revision.
    Large(LargeEvent),
    /// A group of minor revisions.
    Small(SmallEvent),
}

impl TypedEvent {
    /// Identity used for diffing. Unique within a section.
    pub fn id(&self) -> EventId {
        match self {
            TypedEvent::Large(event) => EventId::from_revision("rev-", event.revision_id),
            TypedEvent::Small(event) => EventId::from_revision("small-", event.first_revision_id()),
        }
    }
}

/// A significant revision.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LargeEvent {
    /// Revision this event describes.
    pub revision_id: u64,
    /// When the revision was saved.
    pub timestamp: DateTime<Utc>,
    /// Author of the revision.
    pub user: UserInfo,
    /// What kind of change it was.
    pub kind: LargeEventKind,
    /// Edit summary as entered by the editor.
    #[serde(default)]
    pub summary: Option<String>,
    /// Size change of the article in bytes.
    #[serde(default)]
    pub byte_delta: i64,
}

/// Who made a revision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    /// User name, or the IP address for anonymous edits.
    pub name: String,
    /// Total edits by this user, when known.
    #[serde(default)]
    pub edit_count: Option<u64>,
    /// True for edits made without an account.
    #[serde(default)]
    pub anonymous: bool,
}

/// Classification of a significant revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LargeEventKind {
    /// Text was added.
    AddedText,
    /// Text was removed.
    DeletedText,
    /// A new discussion topic on the talk page.
    NewTalkPageTopic,
    /// Vandalism was reverted.
    VandalismRevert,
    /// References were added.
    ReferencesAdded,
    /// References were removed.
    ReferencesRemoved,
    /// Any other edit.
    Edit,
}

impl LargeEventKind {
    /// Short label shown above the event body.
    pub fn label(self) -> &'static str {
        match self {
            LargeEventKind::AddedText => "Text added",
            LargeEventKind::DeletedText => "Text removed",
            LargeEventKind::NewTalkPageTopic => "New discussion",
            LargeEventKind::VandalismRevert => "Vandalism reverted",
            LargeEventKind::ReferencesAdded => "References added",
            LargeEventKind::ReferencesRemoved => "References removed",
            LargeEventKind::Edit => "Edit",
        }
    }
}

/// A run of minor revisions collapsed into one row.
///
/// Always holds at least one revision id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSmallEvent")]
pub struct SmallEvent {
    revision_ids: Vec<u64>,
}

#[derive(Deserialize)]
struct RawSmallEvent {
    revision_ids: Vec<u64>,
}

/// Error for a small event group without revisions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Small event group must contain at least one revision")]
pub struct EmptySmallEvent;

impl TryFrom<RawSmallEvent> for SmallEvent {
    type Error = EmptySmallEvent;

    fn try_from(raw: RawSmallEvent) -> Result<Self, Self::Error> {
        Self::new(raw.revision_ids)
    }
}

impl SmallEvent {
    /// Group of revisions.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySmallEvent`] when `revision_ids` is empty.
    pub fn new(revision_ids: Vec<u64>) -> Result<Self, EmptySmallEvent> {
        if revision_ids.is_empty() {
            return Err(EmptySmallEvent);
        }
        Ok(Self { revision_ids })
    }

    /// Number of grouped revisions (>= 1).
    pub fn len(&self) -> usize {
        self.revision_ids.len()
    }

    fn first_revision_id(&self) -> u64 {
        // Non-empty by construction
        self.revision_ids.first().copied().unwrap_or_default()
    }
}
