//! Search widget: request lifecycle and keystroke handling
//!
//! A `SearchWidget` owns at most one in-flight request. Starting a new query
//! aborts the previous transfer at the transport level and bumps a generation
//! counter; every surface mutation from a request task is guarded by that
//! counter, so a superseded request can never touch the panel again even if
//! a chunk was already delivered before the abort landed.

mod stream;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::config::{QUERY_PARAM, SearchConfig};
use crate::error::SearchResult;
use crate::surface::ResultSurface;
use crate::urlparam::set_query_param;

use stream::RequestPlan;

/// Lifecycle of the widget's most recent request.
///
/// Cancellation is a valid transition from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// No request has been started yet
    Idle,
    /// Request sent, no body bytes seen
    Requesting,
    /// At least one chunk has arrived
    Streaming,
    /// Stream fully consumed with HTTP 200
    Completed,
    /// Aborted because a newer query superseded it or the panel closed
    Cancelled,
    /// Non-200 status or transport failure
    Failed,
}

impl RequestState {
    /// True once the request can no longer change state on its own
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// State shared between the widget and its request tasks.
///
/// The generation counter is the explicit request-identity token: a task
/// captures the generation it was spawned under and every guarded access
/// re-checks it under the surface lock. No lock is ever held across an await.
pub(crate) struct Shared<S> {
    generation: AtomicU64,
    surface: Mutex<S>,
    state: Mutex<RequestState>,
}

impl<S: ResultSurface> Shared<S> {
    fn new(surface: S) -> Self {
        Self {
            generation: AtomicU64::new(0),
            surface: Mutex::new(surface),
            state: Mutex::new(RequestState::Idle),
        }
    }

    /// Invalidate all outstanding generations and return the new current one
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run `f` against the surface iff `generation` is still current.
    ///
    /// Returns `None` when the caller has been superseded; the generation is
    /// checked under the surface lock so a supersede cannot slip in between
    /// the check and the mutation.
    pub(crate) fn with_surface<R>(
        &self,
        generation: u64,
        f: impl FnOnce(&mut S) -> R,
    ) -> Option<R> {
        let mut surface = self.surface.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }
        Some(f(&mut surface))
    }

    /// Record a state transition for `generation`; stale requests are ignored
    pub(crate) fn set_state(&self, generation: u64, next: RequestState) -> bool {
        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *state = next;
        true
    }
}

/// In-flight network operation owned by the widget
struct ActiveRequest {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Incremental, cancellable search-as-you-type client.
///
/// Feed it keystrokes via [`SearchWidget::on_input`]; it renders streamed
/// results through the surface as response bytes arrive, guaranteeing that
/// only the most recent query's rows are ever shown.
pub struct SearchWidget<S: ResultSurface> {
    config: SearchConfig,
    client: Client,
    shared: Arc<Shared<S>>,
    active: Option<ActiveRequest>,
}

impl<S: ResultSurface> SearchWidget<S> {
    /// Create a widget rendering into `surface`
    pub fn new(config: SearchConfig, surface: S) -> SearchResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            config,
            client,
            shared: Arc::new(Shared::new(surface)),
            active: None,
        })
    }

    /// Handle one input-change event with the current query string.
    ///
    /// Always cancels the in-flight request first; a query shorter than the
    /// configured minimum closes the panel instead of searching.
    pub fn on_input(&mut self, query: &str) {
        self.abort_active();

        if query.chars().count() < self.config.min_query_len() {
            let generation = self.shared.next_generation();
            let _ = self.shared.with_surface(generation, ResultSurface::close_panel);
            return;
        }

        self.start(query);
    }

    /// Handle focus loss: close the results panel
    pub fn on_blur(&mut self) {
        self.close();
    }

    /// Start a search for `query`, superseding any in-flight request.
    ///
    /// Once this returns, the previous request can no longer mutate the
    /// surface: its transport is aborted and its generation is stale.
    pub fn start(&mut self, query: &str) {
        self.abort_active();
        let generation = self.shared.next_generation();

        // Fresh body for the new query; stale rows never mix with new ones
        let _ = self.shared.with_surface(generation, |s| {
            s.open_panel();
            s.clear_panel();
        });
        self.shared.set_state(generation, RequestState::Requesting);

        let plan = RequestPlan {
            url: set_query_param(self.config.endpoint(), QUERY_PARAM, query),
            csrf_token: self.config.csrf_token().to_string(),
            login_url: self.config.login_url().clone(),
            timeout: self.config.request_timeout(),
        };

        tracing::debug!(url = %plan.url, generation, "starting search request");

        let handle = tokio::spawn(stream::run_request(
            self.client.clone(),
            plan,
            Arc::clone(&self.shared),
            generation,
        ));
        self.active = Some(ActiveRequest { generation, handle });
    }

    /// Close the results panel and cancel any in-flight request. Idempotent.
    pub fn close(&mut self) {
        self.abort_active();
        let generation = self.shared.next_generation();
        let _ = self.shared.with_surface(generation, ResultSurface::close_panel);
    }

    /// Abort the in-flight request, if any. Safe to call when the request
    /// already completed.
    fn abort_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.abort();
            // The task can no longer record its own transition
            let mut state = self.shared.state.lock();
            if !state.is_terminal() {
                *state = RequestState::Cancelled;
            }
            tracing::debug!(generation = active.generation, "aborted in-flight request");
        }
    }

    /// State of the most recent request
    #[must_use]
    pub fn state(&self) -> RequestState {
        *self.shared.state.lock()
    }

    /// Whether a request is currently in flight
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.handle.is_finished())
    }

    /// Wait for the in-flight request (if any) to finish or be torn down.
    ///
    /// Aborted tasks resolve here too; their join error is expected.
    pub async fn wait_idle(&mut self) {
        if let Some(active) = self.active.take() {
            let _ = active.handle.await;
        }
    }

    /// Inspect the rendering surface, e.g. to read rows in tests
    pub fn inspect_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.shared.surface.lock())
    }

    /// The widget's validated configuration
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<S: ResultSurface> Drop for SearchWidget<S> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.abort();
        }
    }
}
