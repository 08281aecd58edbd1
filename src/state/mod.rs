//! Timeline state (pure).
//!
//! Reconciliation, pagination and screen state transitions, all testable without a
//! terminal.

pub mod app_state;
pub mod feed_store;
pub mod pagination;
pub mod reconcile;
pub mod snapshot;

// Re-export for convenience
pub use app_state::{AppState, ArticleHeader, Viewport};
pub use feed_store::FeedStateStore;
pub use pagination::{LivingDocDelegate, PaginationOutcome, PaginationTrigger};
pub use reconcile::{diff_keyed, diff_snapshots, KeyedChange, SectionItemChanges, SnapshotDiff};
pub use snapshot::{AppendOutcome, ItemPath, Snapshot, SnapshotBuilder};
