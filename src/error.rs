//! Error types for the streaming search client
//!
//! The taxonomy mirrors how failures are actually handled: superseded
//! requests are expected and silent, an expired session triggers a login
//! redirect, and everything else is swallowed after logging so one failed
//! keystroke never breaks the next one.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for search client operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Error types for a single search request
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request was replaced by a newer query; not a failure
    #[error("request superseded by a newer query")]
    Superseded,

    /// The server answered 401: the session is no longer valid
    #[error("session expired (HTTP 401)")]
    SessionExpired,

    /// The server answered with a non-200, non-401 status
    #[error("search endpoint returned HTTP {0}")]
    UnexpectedStatus(StatusCode),

    /// Network-level failure opening the request or reading the body
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// One response line failed to decode as a result record
    #[error("malformed record line {line:?}: {message}")]
    MalformedRecord { line: String, message: String },

    /// Configuration rejected at build time
    #[error("invalid search configuration: {0}")]
    Config(String),
}

impl SearchError {
    /// True when the failure produces no user-visible action.
    ///
    /// Superseded requests and transport/server hiccups are abandoned
    /// silently; only a 401 carries a visible consequence (the redirect).
    #[must_use]
    pub fn is_silent(&self) -> bool {
        !matches!(self, SearchError::SessionExpired)
    }

    /// True when the failure terminates the whole request rather than
    /// one record within it.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchError::MalformedRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_session_expiry_is_visible() {
        assert!(SearchError::Superseded.is_silent());
        assert!(SearchError::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR).is_silent());
        assert!(!SearchError::SessionExpired.is_silent());
    }

    #[test]
    fn malformed_records_do_not_kill_the_stream() {
        let err = SearchError::MalformedRecord {
            line: "{broken".to_string(),
            message: "expected value".to_string(),
        };
        assert!(!err.is_terminal());
        assert!(SearchError::SessionExpired.is_terminal());
    }
}
