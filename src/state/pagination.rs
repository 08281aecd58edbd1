//! Pagination trigger: fires a fetch when the last item of the last section shows.

use super::snapshot::{ItemPath, Snapshot};
use crate::model::{ContinuationToken, LivingDocViewModel};
use std::sync::Weak;
use tracing::{debug, info};

/// Host collaborator of the timeline screen.
///
/// Supplies the view model at construction and receives fetch requests. Results
/// re-enter through `AppState::append_page`. De-duplicating repeated requests for the
/// same token is the implementor's responsibility.
pub trait LivingDocDelegate: Send + Sync {
    /// Request the page starting at `next_rv_start_id`. Must return immediately.
    fn fetch_next_page(&self, next_rv_start_id: ContinuationToken);

    /// Data backing the screen, if it is available.
    fn view_model(&self) -> Option<LivingDocViewModel>;
}

/// What happened in response to a "will display" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationOutcome {
    /// The delegate was asked for the page at this token.
    Fired(ContinuationToken),
    /// The displayed item is not the last item of the last section.
    NotLastItem,
    /// The displayed item is last but there are no further pages.
    Exhausted,
    /// Nothing is loaded.
    EmptySnapshot,
    /// The delegate has been dropped.
    DelegateGone,
}

/// Watches item visibility and requests the next page.
///
/// Holds a non-owning reference to the delegate; the delegate only needs to be alive
/// for the duration of each call.
#[derive(Debug, Clone)]
pub struct PaginationTrigger {
    delegate: Weak<dyn LivingDocDelegate>,
}

impl PaginationTrigger {
    /// Trigger reporting to `delegate` while it is alive.
    pub fn new(delegate: Weak<dyn LivingDocDelegate>) -> Self {
        Self { delegate }
    }

    /// Handle "item at `path` is about to be shown".
    ///
    /// Calls the delegate at most once per signal.
    pub fn item_will_display(
        &self,
        path: ItemPath,
        snapshot: &Snapshot,
        token: ContinuationToken,
    ) -> PaginationOutcome {
        if snapshot.is_empty() {
            return PaginationOutcome::EmptySnapshot;
        }
        if snapshot.last_item_path() != Some(path) {
            return PaginationOutcome::NotLastItem;
        }
        if token.is_terminal() {
            debug!("Reached end of revision history");
            return PaginationOutcome::Exhausted;
        }
        let Some(delegate) = self.delegate.upgrade() else {
            return PaginationOutcome::DelegateGone;
        };

        info!(next_rv_start_id = %token, "Requesting next page");
        delegate.fetch_next_page(token);
        PaginationOutcome::Fired(token)
    }
}
