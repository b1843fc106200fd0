//! Shared test utilities for campus-search integration tests.
//!
//! Import via `mod common; use common::*;` at the top of each test file.

pub mod fake_backend;

pub use fake_backend::*;

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use campus_search::suggest::{Credential, SuggestClient, SuggestState, spawn_worker};

/// Fetcher for the college endpoint of `backend`, with a live worker thread
pub fn live_fetcher(
    backend: &FakeBackend,
    credential: Credential,
    debounce_ms: u64,
) -> (SuggestState, JoinHandle<()>) {
    let client = SuggestClient::new(&backend.base_url(), COLLEGE_ENDPOINT, credential);
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();

    let mut state = SuggestState::new(debounce_ms, 2);
    state.set_channels(request_tx, response_rx);
    let handle = spawn_worker(client, request_rx, response_tx);
    (state, handle)
}

/// Drive the fetcher like the event loop does until `done` holds.
///
/// Panics after `timeout`.
pub fn pump_until(
    state: &mut SuggestState,
    timeout: Duration,
    mut done: impl FnMut(&SuggestState) -> bool,
) {
    let deadline = Instant::now() + timeout;
    loop {
        state.tick();
        state.poll_response_channel();
        if done(state) {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "timed out; phase={:?} loading={} suggestions={:?}",
            state.phase,
            state.loading,
            state.suggestions
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Keep pumping for `duration` regardless of state.
pub fn pump_for(state: &mut SuggestState, duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        state.tick();
        state.poll_response_channel();
        std::thread::sleep(Duration::from_millis(10));
    }
}
