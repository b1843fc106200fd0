//! Shared test utilities for campus-search
//!
//! Common fixtures and helper functions used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::sync::mpsc::{self, Receiver, Sender};

    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::App;
    use crate::config::Config;
    use crate::form::SearchField;
    use crate::suggest::{SuggestRequest, SuggestResponse};

    /// Helper to create App with default config for tests
    pub fn test_app() -> App {
        App::new(&Config::default())
    }

    /// Helper to create a KeyEvent without modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Helper to create a KeyEvent with specific modifiers
    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// Stand in for a worker: returns the request receiver and response sender
    pub fn attach_channels(
        app: &mut App,
        field: SearchField,
    ) -> (Receiver<SuggestRequest>, Sender<SuggestResponse>) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        app.field_mut(field)
            .suggest
            .set_channels(request_tx, response_rx);
        (request_rx, response_tx)
    }

    /// Drain queued requests as (query, request_id) pairs
    pub fn drain_requests(request_rx: &Receiver<SuggestRequest>) -> Vec<(String, u64)> {
        request_rx
            .try_iter()
            .map(|request| match request {
                SuggestRequest::Fetch {
                    query, request_id, ..
                } => (query, request_id),
            })
            .collect()
    }
}
