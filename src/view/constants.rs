//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for the fixed chrome heights around the timeline.

/// Height of the article header in lines.
///
/// Three text lines ("RECENT CHANGES", title, summary), one sparkline line and a bottom
/// border.
pub const HEADER_HEIGHT: u16 = 5;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Label shown above the article title.
pub const SCREEN_LABEL: &str = "RECENT CHANGES";

/// Width used when the terminal reports zero columns.
pub const FALLBACK_WIDTH: u16 = 80;
