//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod event;
pub mod identifiers;
pub mod key_action;
pub mod page;
pub mod section;

// Re-export for convenience
pub use error::{AppError, FeedError, InputError, ParseError};
pub use event::{EmptySmallEvent, LargeEvent, LargeEventKind, SmallEvent, TypedEvent, UserInfo};
pub use identifiers::{ContinuationToken, EventId, InvalidEventId, InvalidSectionId, SectionId};
pub use key_action::KeyAction;
pub use page::{LivingDocViewModel, RevisionPage};
pub use section::SectionHeader;
