//! View-state layer: measuring, laying out and scrolling the timeline.
//!
//! # Module Structure
//!
//! - `render`: EventRenderAdapter - cell descriptor registry, dispatch and height estimates
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `layout`: FeedLayout - header and item rows of a snapshot
//! - `scroll`: ScrollPosition - semantic scroll position
//! - `visibility`: VisibilityTracker - newly visible item detection

pub mod height_index;
pub mod layout;
pub mod render;
pub mod scroll;
pub mod visibility;
