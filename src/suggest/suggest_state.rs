//! Suggestion fetcher state
//!
//! Owns the query echo, the current suggestion list, the loading flag, and the
//! request bookkeeping that keeps out-of-order responses from being shown.
//!
//! Flow for one input cycle:
//! - keystroke -> `on_query_change_at` -> debounce (Pending)
//! - quiet period elapsed -> `tick_at` -> request sent to worker (InFlight)
//! - worker response -> `process_response` -> Resolved / Failed, or dropped as stale
//!
//! Any keystroke cancels the in-flight token and forgets its request id, so a
//! superseded response can never publish.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use super::debouncer::{DEFAULT_DEBOUNCE_MS, Debouncer};

/// Queries shorter than this (in chars) never reach the backend
pub const MIN_QUERY_LEN: usize = 2;

/// Request messages sent to the suggestion worker thread
#[derive(Debug)]
pub enum SuggestRequest {
    Fetch {
        query: String,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
        cancel_token: CancellationToken,
    },
}

/// Response messages received from the suggestion worker thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestResponse {
    Suggestions { request_id: u64, items: Vec<String> },
    Failed { request_id: u64, error: String },
    Cancelled { request_id: u64 },
}

impl SuggestResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            SuggestResponse::Suggestions { request_id, .. }
            | SuggestResponse::Failed { request_id, .. }
            | SuggestResponse::Cancelled { request_id } => *request_id,
        }
    }
}

/// Where the latest query cycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    /// Debounce timer running
    Pending,
    /// Request sent, waiting for the worker
    InFlight,
    /// Suggestions published
    Resolved,
    /// Request failed, previous list kept
    Failed,
}

/// Why a query change did not schedule a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Shorter than the minimum length; list cleared
    TooShort,
    /// Equal to an entry of the current list; treated as a selection
    KnownSuggestion,
}

/// Result of feeding a new query into the fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// Same text as before; nothing to do
    Unchanged,
    /// Debounce timer (re)started
    Scheduled,
    Suppressed(Suppression),
}

/// What happened to a response from the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Published,
    Failed,
    Cancelled,
    /// Belonged to a superseded request and was discarded
    Stale,
}

/// Debounced, race-free suggestion fetcher for one input
pub struct SuggestState {
    /// Current input text, updated on every keystroke
    pub query: String,
    /// Suggestions for the most recently completed request
    pub suggestions: Vec<String>,
    /// True exactly while the latest cycle has a request in flight
    pub loading: bool,
    pub phase: FetchPhase,
    /// Message from the last failed fetch, cleared on success
    pub last_error: Option<String>,
    min_query_len: usize,
    debouncer: Debouncer,
    request_tx: Option<Sender<SuggestRequest>>,
    response_rx: Option<Receiver<SuggestResponse>>,
    /// Incremented for each request sent
    request_id: u64,
    /// ID of the only request whose response may still publish
    in_flight_request_id: Option<u64>,
    current_cancel_token: Option<CancellationToken>,
}

impl SuggestState {
    pub fn new(debounce_ms: u64, min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            loading: false,
            phase: FetchPhase::Idle,
            last_error: None,
            min_query_len,
            debouncer: Debouncer::new(debounce_ms),
            request_tx: None,
            response_rx: None,
            request_id: 0,
            in_flight_request_id: None,
            current_cancel_token: None,
        }
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: Sender<SuggestRequest>,
        response_rx: Receiver<SuggestResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn has_channels(&self) -> bool {
        self.request_tx.is_some()
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    pub fn on_query_change(&mut self, query: &str) -> QueryChange {
        self.on_query_change_at(query, Instant::now())
    }

    /// Record a new query typed at `now`.
    pub fn on_query_change_at(&mut self, query: &str, now: Instant) -> QueryChange {
        if query == self.query {
            return QueryChange::Unchanged;
        }

        self.query = query.to_string();
        self.cancel_in_flight_request();

        if query.chars().count() < self.min_query_len {
            self.debouncer.cancel();
            self.suggestions.clear();
            self.phase = FetchPhase::Idle;
            return QueryChange::Suppressed(Suppression::TooShort);
        }

        if self.suggestions.iter().any(|s| s == query) {
            self.debouncer.cancel();
            self.phase = FetchPhase::Idle;
            return QueryChange::Suppressed(Suppression::KnownSuggestion);
        }

        self.debouncer.schedule_at(now);
        self.phase = FetchPhase::Pending;
        QueryChange::Scheduled
    }

    /// Replace the query with a chosen entry of the current list.
    ///
    /// Never triggers a fetch. A value that is not in the list is ignored and
    /// reported as `Unchanged`.
    pub fn select_suggestion(&mut self, value: &str) -> QueryChange {
        if !self.suggestions.iter().any(|s| s == value) {
            log::warn!("Ignoring selection of {:?}: not a current suggestion", value);
            return QueryChange::Unchanged;
        }
        self.on_query_change(value)
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Fire the pending request if the quiet period has elapsed at `now`.
    ///
    /// Returns true if state changed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if !self.debouncer.is_ready_at(now) {
            return false;
        }

        self.debouncer.mark_complete();
        self.send_request();
        true
    }

    /// Send a fetch for the current query to the worker.
    fn send_request(&mut self) -> bool {
        self.cancel_in_flight_request();

        let Some(tx) = self.request_tx.as_ref() else {
            log::error!("No suggestion worker attached; dropping fetch for {:?}", self.query);
            self.phase = FetchPhase::Failed;
            return false;
        };

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        let cancel_token = CancellationToken::new();

        #[cfg(debug_assertions)]
        log::debug!("Sending suggestion request {} for {:?}", request_id, self.query);

        if tx
            .send(SuggestRequest::Fetch {
                query: self.query.clone(),
                request_id,
                cancel_token: cancel_token.clone(),
            })
            .is_err()
        {
            log::error!("Suggestion worker disconnected; request {} not sent", request_id);
            self.phase = FetchPhase::Failed;
            return false;
        }

        self.current_cancel_token = Some(cancel_token);
        self.in_flight_request_id = Some(request_id);
        self.loading = true;
        self.phase = FetchPhase::InFlight;
        true
    }

    /// Cancel any in-flight request and forget its ID.
    ///
    /// Returns true if there was one.
    pub fn cancel_in_flight_request(&mut self) -> bool {
        self.loading = false;
        self.in_flight_request_id = None;
        if let Some(token) = self.current_cancel_token.take() {
            #[cfg(debug_assertions)]
            log::debug!("Cancelling in-flight suggestion request");
            token.cancel();
            return true;
        }
        false
    }

    pub fn has_in_flight_request(&self) -> bool {
        self.in_flight_request_id.is_some()
    }

    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    /// Apply one worker response.
    pub fn process_response(&mut self, response: SuggestResponse) -> ResponseOutcome {
        let request_id = response.request_id();
        if self.in_flight_request_id != Some(request_id) {
            #[cfg(debug_assertions)]
            log::debug!(
                "Discarding stale suggestion response {} (in flight: {:?})",
                request_id,
                self.in_flight_request_id
            );
            return ResponseOutcome::Stale;
        }

        self.in_flight_request_id = None;
        self.current_cancel_token = None;
        self.loading = false;

        match response {
            SuggestResponse::Suggestions { items, .. } => {
                self.suggestions = items;
                self.last_error = None;
                self.phase = FetchPhase::Resolved;
                ResponseOutcome::Published
            }
            SuggestResponse::Failed { error, .. } => {
                log::error!("Error fetching suggestions for {:?}: {}", self.query, error);
                self.last_error = Some(error);
                self.phase = FetchPhase::Failed;
                ResponseOutcome::Failed
            }
            SuggestResponse::Cancelled { .. } => {
                self.phase = FetchPhase::Idle;
                ResponseOutcome::Cancelled
            }
        }
    }

    /// Drain the response channel without blocking.
    ///
    /// Returns true if any response arrived or the worker went away.
    pub fn poll_response_channel(&mut self) -> bool {
        let mut responses = Vec::new();
        let mut disconnected = false;

        if let Some(ref rx) = self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let had_responses = !responses.is_empty();
        for response in responses {
            self.process_response(response);
        }

        if disconnected {
            self.response_rx = None;
            if self.loading {
                log::error!("Suggestion worker disconnected unexpectedly");
                self.cancel_in_flight_request();
                self.last_error = Some("Suggestion worker disconnected".to_string());
                self.phase = FetchPhase::Failed;
            }
        }

        had_responses || disconnected
    }
}

impl Default for SuggestState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS, MIN_QUERY_LEN)
    }
}

#[cfg(test)]
#[path = "suggest_state_tests.rs"]
mod suggest_state_tests;
