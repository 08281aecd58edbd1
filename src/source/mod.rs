//! Revision feed input.
//!
//! A feed file is JSON Lines: one [`RevisionPage`] per line. The page whose
//! `rv_start_id` is zero (or, failing that, the first page) is the initial page; every
//! other page is served on request by [`FilePageSource`].

use crate::model::error::{AppError, FeedError, InputError, ParseError};
use crate::model::RevisionPage;
use std::path::Path;
use tracing::{info, warn};

pub mod file;

pub use file::{FilePageSource, PageDelivery};

/// A parsed feed: the initial page plus the pages reachable by continuation token.
#[derive(Debug, Clone)]
pub struct Feed {
    /// Page backing the view model.
    pub initial: RevisionPage,
    /// Every other page, in file order.
    pub pages: Vec<RevisionPage>,
}

/// Parse one feed line.
///
/// # Errors
///
/// Returns `ParseError::InvalidJson` when the line is not a revision page.
pub fn parse_page(raw: &str, line_number: usize) -> Result<RevisionPage, ParseError> {
    serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })
}

/// Parse a whole feed.
///
/// Blank lines are ignored. An unparseable first page is fatal since there is nothing
/// to show without it; unparseable later pages are logged and skipped.
///
/// # Errors
///
/// - `AppError::Parse` when the first non-blank line is invalid
/// - `AppError::Feed(FeedError::NoPages)` when there are no pages
pub fn parse_feed(content: &str) -> Result<Feed, AppError> {
    let mut pages = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        match parse_page(raw, index + 1) {
            Ok(page) => pages.push(page),
            Err(e) if pages.is_empty() => return Err(e.into()),
            Err(e) => warn!(error = %e, "Skipping unparseable page"),
        }
    }

    if pages.is_empty() {
        return Err(FeedError::NoPages.into());
    }
    let initial_index = pages
        .iter()
        .position(|page| page.rv_start_id.is_terminal())
        .unwrap_or(0);
    let initial = pages.remove(initial_index);

    info!(pages = pages.len() + 1, "Parsed feed");
    Ok(Feed { initial, pages })
}

/// Read and parse a feed file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` when the path does not exist, plus the errors of
/// [`parse_feed`].
pub fn load_feed(path: &Path) -> Result<Feed, AppError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let content = std::fs::read_to_string(path).map_err(InputError::Io)?;
    parse_feed(&content)
}
