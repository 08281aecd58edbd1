//! Error types for the living document viewer.
//!
//! Errors form a small hierarchy built with `thiserror`, composing via `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping all domain-specific failures
//!   - [`InputError`] - Feed file reading failures (missing file, IO)
//!   - [`ParseError`] - Feed line parsing failures (malformed JSON)
//!   - [`FeedError`] - Screen construction preconditions (no view model)
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Recovery Strategy
//!
//! Reconciliation itself never fails. Input and construction errors are fatal: the screen
//! never lists without a view model, so it refuses to initialize instead of showing an
//! empty timeline. Parse errors on pages other than the first are logged and the page is
//! skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use livingdoc::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _pages = read_feed()?;
///     Ok(())
/// }
/// # fn read_feed() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the feed file.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// A feed line could not be parsed.
    #[error("Failed to parse revision page: {0}")]
    Parse(#[from] ParseError),

    /// The screen could not be constructed.
    #[error("Cannot open timeline: {0}")]
    Feed(#[from] FeedError),

    /// Terminal or TUI rendering error. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading the revision feed.
#[derive(Debug, Error)]
pub enum InputError {
    /// The feed file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use livingdoc::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// Generic I/O error reading the feed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing feed lines.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line is not a valid revision page.
    ///
    /// `message` is the extracted `serde_json` message, so the error stays cheap to clone
    /// into log output.
    ///
    /// # Examples
    ///
    /// ```
    /// use livingdoc::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 3,
    ///     message: "missing field `title`".to_string()
    /// };
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the feed file.
        line: usize,
        /// Parser error message.
        message: String,
    },
}

/// Preconditions for building the timeline screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The delegate could not supply a view model.
    #[error("no view model available for the article")]
    MissingViewModel,

    /// The feed contains no pages at all.
    #[error("feed contains no revision pages")]
    NoPages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_file_not_found_display() {
        let err = InputError::FileNotFound {
            path: PathBuf::from("/data/dog.jsonl"),
        };
        assert_eq!(err.to_string(), "File not found: /data/dog.jsonl");
    }

    #[test]
    fn input_error_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InputError = io.into();
        assert!(matches!(err, InputError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn parse_error_invalid_json_display() {
        let err = ParseError::InvalidJson {
            line: 7,
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid JSON at line 7: expected value");
    }

    #[test]
    fn app_error_from_feed_error() {
        let err: AppError = FeedError::MissingViewModel.into();
        assert!(matches!(err, AppError::Feed(FeedError::MissingViewModel)));
        assert!(err.to_string().contains("no view model"));
    }

    #[test]
    fn app_error_from_input_error() {
        let err: AppError = InputError::FileNotFound {
            path: PathBuf::from("x.jsonl"),
        }
        .into();
        assert!(matches!(err, AppError::InputRead(_)));
    }

    #[test]
    fn app_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Terminal(_)));
    }
}
