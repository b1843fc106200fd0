//! Backend autocomplete for a single text input
//!
//! Debounces keystrokes, fetches suggestions on a background worker, and
//! publishes only the result of the most recently initiated request.

pub mod client;
pub mod debouncer;
pub mod suggest_state;
pub mod worker;

// Re-export public types
pub use client::{Credential, SuggestClient, SuggestError, parse_suggestions};
pub use debouncer::{DEFAULT_DEBOUNCE_MS, Debouncer};
pub use suggest_state::{
    FetchPhase, MIN_QUERY_LEN, QueryChange, ResponseOutcome, SuggestRequest, SuggestResponse,
    SuggestState, Suppression,
};
pub use worker::spawn_worker;
