//! Type-safe builder for `SearchConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time
//! validation ensuring that required fields are set before building a
//! `SearchConfig`.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::time::Duration;
use url::Url;

use crate::classify::login_comeback_url;

use super::types::{DEFAULT_MIN_QUERY_LEN, DEFAULT_SEARCH_PATH, SearchConfig};

// Type states for the builder
pub struct WithOrigin;
pub struct WithCsrfToken;

pub struct SearchConfigBuilder<State = ()> {
    pub(crate) origin: Option<Url>,
    pub(crate) csrf_token: Option<String>,
    pub(crate) page_url: Option<Url>,
    pub(crate) search_path: String,
    pub(crate) min_query_len: usize,
    pub(crate) request_timeout: Option<Duration>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for SearchConfigBuilder<()> {
    fn default() -> Self {
        Self {
            origin: None,
            csrf_token: None,
            page_url: None,
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            request_timeout: None,
            _phantom: PhantomData,
        }
    }
}

impl SearchConfig {
    /// Create a builder for configuring a `SearchConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> SearchConfigBuilder<()> {
        SearchConfigBuilder::default()
    }
}

impl SearchConfigBuilder<()> {
    /// Set the server origin, e.g. `https://wiki.example.net`
    pub fn origin(self, origin: Url) -> SearchConfigBuilder<WithOrigin> {
        SearchConfigBuilder {
            origin: Some(origin),
            csrf_token: self.csrf_token,
            page_url: self.page_url,
            search_path: self.search_path,
            min_query_len: self.min_query_len,
            request_timeout: self.request_timeout,
            _phantom: PhantomData,
        }
    }
}

impl SearchConfigBuilder<WithOrigin> {
    /// Set the CSRF token sent as `X-XSRF-TOKEN` on every request
    pub fn csrf_token(self, token: impl Into<String>) -> SearchConfigBuilder<WithCsrfToken> {
        SearchConfigBuilder {
            origin: self.origin,
            csrf_token: Some(token.into()),
            page_url: self.page_url,
            search_path: self.search_path,
            min_query_len: self.min_query_len,
            request_timeout: self.request_timeout,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl SearchConfigBuilder<WithCsrfToken> {
    pub fn build(self) -> Result<SearchConfig> {
        let origin = self.origin.ok_or_else(|| anyhow!("origin is required"))?;
        if origin.cannot_be_a_base() {
            return Err(anyhow!("origin must be a base URL: {origin}"));
        }
        if self.min_query_len == 0 {
            return Err(anyhow!("min_query_len must be at least 1"));
        }

        let csrf_token = self
            .csrf_token
            .ok_or_else(|| anyhow!("csrf_token is required"))?;

        // Resolve request targets once; the per-keystroke path only clones
        let endpoint = origin
            .join(&self.search_path)
            .map_err(|e| anyhow!("invalid search path {:?}: {e}", self.search_path))?;
        let page_url = self.page_url.unwrap_or_else(|| origin.clone());
        let login_url = login_comeback_url(&origin, &page_url)?;

        Ok(SearchConfig {
            origin,
            csrf_token,
            page_url,
            endpoint,
            login_url,
            min_query_len: self.min_query_len,
            request_timeout: self.request_timeout,
        })
    }
}

// Builder methods available at any state (all optional fields)
impl<State> SearchConfigBuilder<State> {
    /// Set the page URL used as the login `comeback` target
    ///
    /// Defaults to the origin when unset.
    #[must_use]
    pub fn page_url(mut self, page: Url) -> Self {
        self.page_url = Some(page);
        self
    }

    /// Override the search endpoint path (default `/search/`)
    #[must_use]
    pub fn search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = path.into();
        self
    }

    /// Set the minimum query length that triggers a search (default 3)
    #[must_use]
    pub fn min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Set an optional per-request timeout (default: none)
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults_resolved() {
        let config = SearchConfig::builder()
            .origin(Url::parse("https://wiki.example.net").unwrap())
            .csrf_token("tok123")
            .build()
            .expect("config should build");

        assert_eq!(config.endpoint().as_str(), "https://wiki.example.net/search/");
        assert_eq!(config.login_url().path(), "/login/");
        assert_eq!(config.min_query_len(), DEFAULT_MIN_QUERY_LEN);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn comeback_defaults_to_origin_but_follows_page_url() {
        let page = Url::parse("https://wiki.example.net/wiki/Ops?rev=3").unwrap();
        let config = SearchConfig::builder()
            .page_url(page.clone())
            .origin(Url::parse("https://wiki.example.net").unwrap())
            .csrf_token("tok123")
            .build()
            .unwrap();

        assert_eq!(config.page_url(), &page);
        assert!(config.login_url().query().unwrap().starts_with("comeback="));
    }

    #[test]
    fn rejects_zero_min_query_len() {
        let err = SearchConfig::builder()
            .min_query_len(0)
            .origin(Url::parse("https://wiki.example.net").unwrap())
            .csrf_token("tok123")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("min_query_len"));
    }
}
