//! Living document viewer (livingdoc)
//!
//! Terminal rendition of an article's "Recent Changes" timeline: revisions grouped into
//! dated sections, loaded page by page as the reader scrolls toward older history.
//!
//! Follows a Pure Core / Impure Shell split. `model`, `state` and `view_state` hold the
//! data types, the reconciling feed store and pagination trigger, and layout; `view`
//! owns the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
