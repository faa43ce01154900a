//! Core configuration types for the search client
//!
//! This module contains the `SearchConfig` struct with its derived request
//! targets, which are resolved once at build time so the per-keystroke path
//! never re-parses URLs.

use std::time::Duration;
use url::Url;

/// Query parameter carrying the search terms on the wire
pub const QUERY_PARAM: &str = "qa";

/// Path of the search endpoint relative to the origin
pub const DEFAULT_SEARCH_PATH: &str = "/search/";

/// Minimum query length that triggers a search; anything shorter closes the
/// results panel instead
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Validated configuration for a search widget
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Server origin all request targets derive from
    pub(crate) origin: Url,

    /// CSRF token sent as `X-XSRF-TOKEN` on every request.
    /// In the original this was read from the first control of the
    /// CSRF-bearing form inside the widget element.
    pub(crate) csrf_token: String,

    /// The page the user is on, round-tripped through the login redirect
    /// as the `comeback` target
    pub(crate) page_url: Url,

    /// Resolved search endpoint (`origin` + search path), before the query
    /// parameter is applied
    pub(crate) endpoint: Url,

    /// Resolved `/login/?comeback=...` redirect target
    pub(crate) login_url: Url,

    /// Queries shorter than this do not search
    pub(crate) min_query_len: usize,

    /// Optional per-request timeout; the reference behavior has none, a
    /// request lives until it completes, errors, or is superseded
    pub(crate) request_timeout: Option<Duration>,
}

impl SearchConfig {
    /// Server origin the widget talks to
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// CSRF token attached to every search request
    #[must_use]
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// The page whose URL is used as the login `comeback` target
    #[must_use]
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Resolved search endpoint before the query parameter is applied
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolved session-expiry redirect target
    #[must_use]
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// Minimum query length that triggers a search
    #[must_use]
    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Per-request timeout, when configured
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
