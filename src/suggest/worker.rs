//! Suggestion worker thread
//!
//! Runs backend requests off the UI thread. Receives requests via channel,
//! races each HTTP call against its cancellation token, and sends the outcome
//! back tagged with the request ID so the UI can drop stale results.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use tokio_util::sync::CancellationToken;

use super::client::{SuggestClient, SuggestError};
use super::suggest_state::{SuggestRequest, SuggestResponse};

/// Spawn the suggestion worker thread
///
/// The thread owns a single-threaded tokio runtime and exits when the request
/// channel closes. A client that failed to build is reported on every request
/// instead of killing the thread.
pub fn spawn_worker(
    client: Result<SuggestClient, SuggestError>,
    request_rx: Receiver<SuggestRequest>,
    response_tx: Sender<SuggestResponse>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create tokio runtime for suggestion worker: {}", e);
                return;
            }
        };

        rt.block_on(worker_loop(client, request_rx, response_tx));
    })
}

/// Process requests until the channel is closed
///
/// Blocking `recv()` is fine here since the worker has a dedicated thread.
async fn worker_loop(
    client: Result<SuggestClient, SuggestError>,
    request_rx: Receiver<SuggestRequest>,
    response_tx: Sender<SuggestResponse>,
) {
    while let Ok(request) = request_rx.recv() {
        match request {
            SuggestRequest::Fetch {
                query,
                request_id,
                cancel_token,
            } => {
                let response = handle_fetch_async(&client, &query, request_id, cancel_token).await;
                if response_tx.send(response).is_err() {
                    // UI side is gone
                    break;
                }
            }
        }
    }

    #[cfg(debug_assertions)]
    log::debug!("Suggestion worker shutting down");
}

/// Run one fetch, checking cancellation first
async fn handle_fetch_async(
    client: &Result<SuggestClient, SuggestError>,
    query: &str,
    request_id: u64,
    cancel_token: CancellationToken,
) -> SuggestResponse {
    if cancel_token.is_cancelled() {
        return SuggestResponse::Cancelled { request_id };
    }

    let client = match client {
        Ok(client) => client,
        Err(e) => {
            return SuggestResponse::Failed {
                request_id,
                error: e.to_string(),
            };
        }
    };

    let result = tokio::select! {
        biased;

        _ = cancel_token.cancelled() => Err(SuggestError::Cancelled),
        result = client.fetch(query) => result,
    };

    match result {
        Ok(items) => SuggestResponse::Suggestions { request_id, items },
        Err(SuggestError::Cancelled) => {
            #[cfg(debug_assertions)]
            log::debug!("Suggestion request {} cancelled", request_id);
            SuggestResponse::Cancelled { request_id }
        }
        Err(e) => SuggestResponse::Failed {
            request_id,
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
