//! Fake autocomplete backend for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1, on its own thread and runtime so both sync and async tests can
//! use it. Serves `GET /api/colleges/autocomplete/?query=...` with canned
//! replies and records every request it sees.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;

pub const COLLEGE_ENDPOINT: &str = "api/colleges/autocomplete/";

/// Canned reply for one query
#[derive(Clone)]
pub enum Reply {
    Items(Vec<String>),
    Status(u16),
    Raw(String),
}

/// One request as the backend saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct BackendState {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    seen: Vec<SeenRequest>,
}

#[derive(Deserialize)]
struct SuggestParams {
    query: String,
}

/// Handle to the running fake backend.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    /// Start the server and return once it is listening.
    pub fn start() -> Self {
        let state = Arc::new(Mutex::new(BackendState::default()));
        let server_state = state.clone();
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            rt.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();

                let app = Router::new()
                    .route("/api/colleges/autocomplete/", get(autocomplete))
                    .with_state(server_state);

                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = addr_rx.recv().unwrap();
        Self { addr, state }
    }

    /// Base URL for the backend (e.g. `http://127.0.0.1:PORT/`).
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn reply(&self, query: &str, reply: Reply) {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(query.to_string(), reply);
    }

    pub fn reply_items(&self, query: &str, items: &[&str]) {
        self.reply(query, Reply::Items(items.iter().map(|s| s.to_string()).collect()));
    }

    /// Hold the reply for `query` this long before answering.
    pub fn delay(&self, query: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(query.to_string(), delay);
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn seen_queries(&self) -> Vec<String> {
        self.seen().into_iter().map(|r| r.query).collect()
    }
}

async fn autocomplete(
    State(state): State<Arc<Mutex<BackendState>>>,
    headers: HeaderMap,
    Query(params): Query<SuggestParams>,
) -> Response {
    let (reply, delay) = {
        let mut state = state.lock().unwrap();
        state.seen.push(SeenRequest {
            query: params.query.clone(),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string()),
        });
        (
            state
                .replies
                .get(&params.query)
                .cloned()
                .unwrap_or(Reply::Items(Vec::new())),
            state.delays.get(&params.query).copied(),
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    match reply {
        Reply::Items(items) => Json(items).into_response(),
        Reply::Status(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "backend exploded",
        )
            .into_response(),
        Reply::Raw(body) => body.into_response(),
    }
}
