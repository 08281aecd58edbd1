//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::Deserialize;
use std::fmt;

/// Stable identity of a timeline section (one per calendar day of edits).
///
/// Reconciliation matches sections by this value alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct SectionId(String);

impl SectionId {
    /// Smart constructor: validates non-empty section ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSectionId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidSectionId::Empty);
        }
        Ok(Self(raw))
    }

    /// Raw id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SectionId {
    type Error = InvalidSectionId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a single timeline event, unique within its section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    /// Smart constructor: validates non-empty event ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidEventId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidEventId::Empty);
        }
        Ok(Self(raw))
    }

    /// Identity derived from a revision id. Never empty.
    pub(crate) fn from_revision(prefix: &str, revision_id: u64) -> Self {
        Self(format!("{prefix}{revision_id}"))
    }

    /// Raw id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque cursor for the next page of revisions (`rvstartid`).
///
/// Zero means the history is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(u64);

impl ContinuationToken {
    /// Token meaning "no further pages".
    pub const END: Self = Self(0);

    /// Wrap a raw `rvstartid` value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw `rvstartid` value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// True when no further pages can be requested with this token.
    pub fn is_terminal(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== Error Types =====

/// Rejected section id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSectionId {
    /// The id was empty.
    #[error("Section ID cannot be empty")]
    Empty,
}

/// Rejected event id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEventId {
    /// The id was empty.
    #[error("Event ID cannot be empty")]
    Empty,
}

// ===== Tests =====
