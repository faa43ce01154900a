//! Request transfer task: streamed GET, incremental parse, guarded render
//!
//! One task per started request. The task accumulates the body as chunks
//! arrive, drains complete records through the parser, and hands each batch
//! to the surface only while its generation is still current.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::{Client, StatusCode, header};
use url::Url;

use crate::classify::{Disposition, classify};
use crate::error::{SearchError, SearchResult};
use crate::parser::drain_records;
use crate::surface::ResultSurface;

use super::{RequestState, Shared};

/// MIME type identifying the streamable record-sequence payload
const JSON_SEQ_MIME: &str = "application/json-seq";

/// Header carrying the CSRF token
const CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Everything a request task needs, captured at start time so the task never
/// reads widget state it does not own
pub(crate) struct RequestPlan {
    pub(crate) url: Url,
    pub(crate) csrf_token: String,
    pub(crate) login_url: Url,
    pub(crate) timeout: Option<Duration>,
}

/// Drive one request to a terminal state.
pub(crate) async fn run_request<S: ResultSurface>(
    client: Client,
    plan: RequestPlan,
    shared: Arc<Shared<S>>,
    generation: u64,
) {
    match stream_response(&client, &plan, &shared, generation).await {
        Ok(()) => {
            shared.set_state(generation, RequestState::Completed);
        }
        Err(err) => {
            match classify(&err, &plan.login_url) {
                Disposition::Redirect(target) => {
                    let _ = shared.with_surface(generation, |s| s.navigate(target));
                }
                Disposition::Ignore => {}
            }
            let terminal = if matches!(err, SearchError::Superseded) {
                RequestState::Cancelled
            } else {
                RequestState::Failed
            };
            shared.set_state(generation, terminal);
        }
    }
}

/// Issue the GET and consume the body chunk by chunk.
///
/// Returns `Err(Superseded)` as soon as a guarded surface access detects a
/// stale generation; any bytes already delivered are simply dropped.
async fn stream_response<S: ResultSurface>(
    client: &Client,
    plan: &RequestPlan,
    shared: &Arc<Shared<S>>,
    generation: u64,
) -> SearchResult<()> {
    let mut request = client
        .get(plan.url.clone())
        .header(header::ACCEPT, JSON_SEQ_MIME)
        .header(CSRF_HEADER, &plan.csrf_token);
    if let Some(timeout) = plan.timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(SearchError::SessionExpired);
    }
    if status != StatusCode::OK {
        return Err(SearchError::UnexpectedStatus(status));
    }

    let mut body: Vec<u8> = Vec::new();
    let mut cursor = 0usize;
    let mut rows_rendered = 0usize;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        body.extend_from_slice(&chunk);
        shared.set_state(generation, RequestState::Streaming);
        rows_rendered += flush_records(&body, &mut cursor, shared, generation)?;
    }

    // Completion flush; a trailing unterminated line is dropped here,
    // never force-parsed
    rows_rendered += flush_records(&body, &mut cursor, shared, generation)?;

    // A body that never produced a byte is the conclusive no-results signal
    if rows_rendered == 0 && body.is_empty() {
        shared
            .with_surface(generation, ResultSurface::show_no_results)
            .ok_or(SearchError::Superseded)?;
    }

    tracing::debug!(rows = rows_rendered, bytes = body.len(), "search stream completed");
    Ok(())
}

/// Drain newly-completed records and append them as one batch.
fn flush_records<S: ResultSurface>(
    body: &[u8],
    cursor: &mut usize,
    shared: &Arc<Shared<S>>,
    generation: u64,
) -> SearchResult<usize> {
    let records = drain_records(body, cursor);
    if records.is_empty() {
        return Ok(0);
    }

    shared
        .with_surface(generation, |s| s.append_rows(&records))
        .ok_or(SearchError::Superseded)?;
    Ok(records.len())
}
