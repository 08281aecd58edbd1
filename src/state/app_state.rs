//! Application state and transitions.
//!
//! AppState is the root state of the timeline screen. It owns the feed store, the
//! pagination trigger, and the view-state needed to decide which items are on screen.
//! No terminal I/O happens here; the shell feeds it key actions, viewport sizes and
//! page deliveries.

use crate::model::{ContinuationToken, FeedError, KeyAction, LivingDocViewModel, RevisionPage};
use crate::state::feed_store::FeedStateStore;
use crate::state::pagination::{LivingDocDelegate, PaginationOutcome, PaginationTrigger};
use crate::state::reconcile::SnapshotDiff;
use crate::state::snapshot::Snapshot;
use crate::view::styles::{ColorConfig, Theme, ThemeName};
use crate::view_state::layout::{FeedLayout, VisibleRows};
use crate::view_state::render::EventRenderAdapter;
use crate::view_state::scroll::ScrollPosition;
use crate::view_state::visibility::VisibilityTracker;
use std::sync::Arc;
use tracing::{debug, warn};

// ===== Viewport =====

/// Size of the timeline area, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Columns available to cells.
    pub width: u16,
    /// Rows available to the timeline.
    pub height: u16,
}

// ===== ArticleHeader =====

/// Article-level data shown above the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleHeader {
    /// Article title.
    pub title: Option<String>,
    /// Short article description.
    pub summary: Option<String>,
    /// Edit counts per period, oldest first.
    pub edit_metrics: Vec<u64>,
}

// ===== Detached =====

/// Stand-in delegate for screens built without one. Dropped right after the trigger
/// downgrades it, so the trigger always sees it as gone.
struct Detached;

impl LivingDocDelegate for Detached {
    fn fetch_next_page(&self, _next_rv_start_id: ContinuationToken) {}

    fn view_model(&self) -> Option<LivingDocViewModel> {
        None
    }
}

// ===== AppState =====

/// Timeline screen state.
///
/// # State Machine
///
/// - **Idle**: no page request outstanding.
/// - **Loading**: a request for `pending_request` was fired and no page for it has
///   arrived yet. Set when the trigger fires, cleared by `append_page` or
///   `page_unavailable` for the same token. A token reported unavailable never
///   re-enters Loading; the trigger may still re-signal it to the delegate.
/// - **Exhausted**: the continuation token is terminal; the trigger never fires again.
///
/// Every change of snapshot, viewport or scroll position re-evaluates which items are
/// visible and signals newly visible ones to the pagination trigger.
#[derive(Debug)]
pub struct AppState {
    store: FeedStateStore,
    trigger: PaginationTrigger,
    adapter: EventRenderAdapter,
    layout: FeedLayout,
    tracker: VisibilityTracker,

    /// Article title, summary and activity sparkline data.
    pub header: ArticleHeader,

    theme_name: ThemeName,
    colors: ColorConfig,
    scroll: ScrollPosition,
    viewport: Viewport,
    pending_request: Option<ContinuationToken>,
    unavailable: Option<ContinuationToken>,
    latest_page: SnapshotDiff,

    /// Set by the close action; the shell exits its loop when true.
    pub should_quit: bool,
}

impl AppState {
    /// Build the screen from the delegate's view model.
    ///
    /// Fails with [`FeedError::MissingViewModel`] when the delegate has no data. Only a
    /// weak reference to the delegate is retained.
    pub fn new(
        delegate: &Arc<dyn LivingDocDelegate>,
        adapter: EventRenderAdapter,
        theme_name: ThemeName,
        colors: ColorConfig,
    ) -> Result<Self, FeedError> {
        let view_model = delegate.view_model().ok_or(FeedError::MissingViewModel)?;
        Ok(Self::with_trigger(
            &view_model,
            PaginationTrigger::new(Arc::downgrade(delegate)),
            adapter,
            theme_name,
            colors,
        ))
    }

    /// Build the screen from a view model with no delegate attached.
    ///
    /// Pagination signals report [`PaginationOutcome::DelegateGone`].
    pub fn detached(
        view_model: &LivingDocViewModel,
        adapter: EventRenderAdapter,
        theme_name: ThemeName,
        colors: ColorConfig,
    ) -> Self {
        let gone: Arc<dyn LivingDocDelegate> = Arc::new(Detached);
        Self::with_trigger(
            view_model,
            PaginationTrigger::new(Arc::downgrade(&gone)),
            adapter,
            theme_name,
            colors,
        )
    }

    fn with_trigger(
        view_model: &LivingDocViewModel,
        trigger: PaginationTrigger,
        adapter: EventRenderAdapter,
        theme_name: ThemeName,
        colors: ColorConfig,
    ) -> Self {
        let mut store = FeedStateStore::new();
        store.add_initial_page(view_model);
        Self {
            store,
            trigger,
            adapter,
            layout: FeedLayout::default(),
            tracker: VisibilityTracker::new(),
            header: ArticleHeader {
                title: view_model.article_title.clone(),
                summary: view_model.summary_text.clone(),
                edit_metrics: view_model.edit_metrics.clone(),
            },
            theme_name,
            colors,
            scroll: ScrollPosition::Top,
            viewport: Viewport::default(),
            pending_request: None,
            unavailable: None,
            latest_page: SnapshotDiff::default(),
            should_quit: false,
        }
    }

    // ===== Accessors =====

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    /// Underlying feed store.
    pub fn store(&self) -> &FeedStateStore {
        &self.store
    }

    /// Cell descriptors used for layout and drawing.
    pub fn adapter(&self) -> &EventRenderAdapter {
        &self.adapter
    }

    /// Row layout of the current snapshot.
    pub fn layout(&self) -> &FeedLayout {
        &self.layout
    }

    /// Resolved palette for the current theme and color setting.
    pub fn theme(&self) -> Theme {
        Theme::new(self.theme_name, self.colors)
    }

    /// Name of the current theme.
    pub fn theme_name(&self) -> ThemeName {
        self.theme_name
    }

    /// Current timeline viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current scroll intent.
    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }

    /// First visible line of the timeline.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
            .resolve(self.layout.total_height(), usize::from(self.viewport.height))
    }

    /// Rows intersecting the viewport at the current scroll offset.
    pub fn visible_rows(&self) -> VisibleRows {
        self.layout
            .visible_rows(self.scroll_offset(), self.viewport.height)
    }

    /// True while a page request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }

    /// True once the last page has been merged.
    pub fn is_exhausted(&self) -> bool {
        self.store.is_exhausted()
    }

    /// Changes made by the most recently merged page. Empty before the first append.
    pub fn latest_page(&self) -> &SnapshotDiff {
        &self.latest_page
    }

    // ===== Transitions =====

    /// Resize the timeline area. Relayouts when the width changes.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<PaginationOutcome> {
        let width_changed = viewport.width != self.viewport.width || self.layout.is_empty();
        self.viewport = viewport;
        if width_changed {
            self.relayout();
        }
        self.notify_visible_items()
    }

    /// Merge a fetched page.
    ///
    /// Item paths of already loaded items do not change on append, so the scroll
    /// position is kept as is.
    pub fn append_page(&mut self, page: RevisionPage) -> Vec<PaginationOutcome> {
        if self.pending_request == Some(page.rv_start_id) {
            self.pending_request = None;
        }
        if self.unavailable == Some(page.rv_start_id) {
            self.unavailable = None;
        }
        debug!(
            rv_start_id = %page.rv_start_id,
            next_rv_start_id = %page.next_rv_start_id,
            sections = page.sections.len(),
            "Merging page"
        );
        self.latest_page = self.store.append_page(page);
        self.relayout();
        self.notify_visible_items()
    }

    /// The page for `token` could not be produced; stop showing the loading state.
    pub fn page_unavailable(&mut self, token: ContinuationToken) {
        warn!(rv_start_id = %token, "Requested page is unavailable");
        if self.pending_request == Some(token) {
            self.pending_request = None;
        }
        self.unavailable = Some(token);
    }

    /// Apply a key action.
    pub fn handle_action(&mut self, action: KeyAction) -> Vec<PaginationOutcome> {
        match action {
            KeyAction::CycleTheme => {
                self.theme_name = self.theme_name.next();
                debug!(theme = %self.theme_name, "Theme changed");
                self.relayout();
                Vec::new()
            }
            KeyAction::Close => {
                self.should_quit = true;
                Vec::new()
            }
            scroll => {
                self.scroll = self.scroll.apply(
                    scroll,
                    self.layout.total_height(),
                    usize::from(self.viewport.height),
                );
                self.notify_visible_items()
            }
        }
    }

    /// Signal every item that just became visible to the pagination trigger.
    pub fn notify_visible_items(&mut self) -> Vec<PaginationOutcome> {
        let snapshot = self.store.snapshot();
        let visible = self.visible_rows();
        let displayed = self.layout.displayed_items(&snapshot, visible.rows);
        let token = self.store.continuation_token();
        let unavailable = self.unavailable;

        self.tracker
            .update(displayed)
            .into_iter()
            .map(|path| {
                let outcome = self.trigger.item_will_display(path, &snapshot, token);
                match outcome {
                    PaginationOutcome::Fired(token) if Some(token) != unavailable => {
                        self.pending_request = Some(token);
                    }
                    _ => {}
                }
                outcome
            })
            .collect()
    }

    fn relayout(&mut self) {
        let snapshot = self.store.snapshot();
        self.layout = FeedLayout::compute(
            &snapshot,
            &self.adapter,
            self.viewport.width,
            &self.theme(),
        );
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
