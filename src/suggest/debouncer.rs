//! Debouncer for suggestion requests
//!
//! Delays backend calls until the user stops typing. Every keystroke restarts
//! the quiet period, so a burst of input collapses into one request carrying the
//! final query.

use std::time::{Duration, Instant};

/// Quiet period between the last keystroke and the suggestion request
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Tracks when the last keystroke occurred and whether a request is waiting.
///
/// The `_at` variants take the current instant explicitly so the event loop and
/// tests share one clock.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet period before a pending request fires
    delay: Duration,
    /// Timestamp of the last input that (re)started the timer
    last_input_time: Option<Instant>,
    /// Whether a request is waiting for the quiet period to expire
    pending: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_input_time: None,
            pending: false,
        }
    }

    /// Start or restart the quiet period at `now`.
    pub fn schedule_at(&mut self, now: Instant) {
        self.last_input_time = Some(now);
        self.pending = true;
    }

    /// Drop the pending request without firing it.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.last_input_time = None;
    }

    /// Returns `true` once a request is pending and the full quiet period has
    /// elapsed since the last input.
    pub fn is_ready_at(&self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }

        match self.last_input_time {
            Some(last_time) => now.saturating_duration_since(last_time) >= self.delay,
            None => false,
        }
    }

    /// Clear the pending flag after the request has been issued.
    pub fn mark_complete(&mut self) {
        self.pending = false;
        self.last_input_time = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
