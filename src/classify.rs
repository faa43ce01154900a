//! Session/error classifier
//!
//! Decides what a failed request means for the user: a 401 ends the session
//! and redirects to the login page with a comeback target; a superseded or
//! otherwise failed request is abandoned without touching whatever valid
//! rows are already on screen.

use url::Url;

use crate::error::SearchError;
use crate::urlparam::set_query_param;

/// User-visible consequence of a failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Abandon the request quietly
    Ignore,
    /// Navigate the surface to re-authenticate
    Redirect(Url),
}

/// Classify a terminal request failure.
///
/// `login_url` is the precomputed re-authentication target carried by the
/// request plan; it is only consulted for session expiry.
pub fn classify(err: &SearchError, login_url: &Url) -> Disposition {
    match err {
        SearchError::SessionExpired => Disposition::Redirect(login_url.clone()),
        SearchError::Superseded => Disposition::Ignore,
        other => {
            tracing::debug!(error = %other, "search request abandoned");
            Disposition::Ignore
        }
    }
}

/// Build the login redirect URL: `<origin>/login/?comeback=<page>`.
///
/// The comeback value is percent-encoded, so round-tripping the full page URL
/// (query string included) through the redirect is lossless.
pub fn login_comeback_url(origin: &Url, page: &Url) -> Result<Url, SearchError> {
    let login = origin
        .join("/login/")
        .map_err(|e| SearchError::Config(format!("cannot derive login URL: {e}")))?;
    Ok(set_query_param(&login, "comeback", page.as_str()))
}
