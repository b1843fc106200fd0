//! Suggestion backend client
//!
//! Issues `GET {base_url}{endpoint}?query=<text>` and validates the body into a
//! list of strings before anything else in the crate sees it.

use std::fmt;

use reqwest::{Client, RequestBuilder, Url};
use thiserror::Error;

use crate::config::BackendConfig;

/// Errors that can occur while fetching suggestions
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SuggestError {
    /// Backend URL or endpoint is unusable
    #[error("Suggestions not configured: {0}")]
    NotConfigured(String),

    /// Request could not complete (DNS, connect, reset, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("Backend error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Body was not a JSON array of strings
    #[error("Invalid suggestion payload: {0}")]
    Parse(String),

    /// Request was cancelled because a newer query superseded it
    #[error("Request cancelled")]
    Cancelled,
}

/// Bearer credential attached to outgoing requests.
///
/// Passed explicitly to the client instead of being looked up from shared state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    token: Option<String>,
}

impl Credential {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Blank tokens are treated as anonymous.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            return Self::anonymous();
        }
        Self { token: Some(token) }
    }

    pub fn from_token(token: Option<&str>) -> Self {
        token.map(Self::bearer).unwrap_or_default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token {
            Some(_) => f.write_str("Credential(Bearer <redacted>)"),
            None => f.write_str("Credential(anonymous)"),
        }
    }
}

/// Async client for one autocomplete endpoint
#[derive(Debug, Clone)]
pub struct SuggestClient {
    client: Client,
    url: Url,
    credential: Credential,
}

impl SuggestClient {
    /// Build a client for `endpoint` under `base_url`.
    pub fn new(base_url: &str, endpoint: &str, credential: Credential) -> Result<Self, SuggestError> {
        let url = join_endpoint(base_url, endpoint)?;
        Ok(Self {
            client: Client::new(),
            url,
            credential,
        })
    }

    pub fn from_config(backend: &BackendConfig, endpoint: &str) -> Result<Self, SuggestError> {
        Self::new(
            &backend.base_url,
            endpoint,
            Credential::from_token(backend.token.as_deref()),
        )
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Fetch suggestions for `query`.
    pub async fn fetch(&self, query: &str) -> Result<Vec<String>, SuggestError> {
        let request = self.client.get(self.url.clone()).query(&[("query", query)]);

        let response = self
            .credential
            .apply(request)
            .send()
            .await
            .map_err(|e| SuggestError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SuggestError::Api { code, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SuggestError::Network(e.to_string()))?;

        parse_suggestions(&body)
    }
}

/// Validate a response body into an ordered list of suggestions.
pub fn parse_suggestions(body: &str) -> Result<Vec<String>, SuggestError> {
    serde_json::from_str::<Vec<String>>(body).map_err(|e| SuggestError::Parse(e.to_string()))
}

fn join_endpoint(base_url: &str, endpoint: &str) -> Result<Url, SuggestError> {
    let base = base_url.trim();
    if base.is_empty() {
        return Err(SuggestError::NotConfigured(
            "Missing base_url. Add 'base_url' in the [backend] section or pass --base-url.".to_string(),
        ));
    }

    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim().trim_start_matches('/')
    );

    let url = Url::parse(&joined)
        .map_err(|e| SuggestError::NotConfigured(format!("Invalid URL '{}': {}", joined, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SuggestError::NotConfigured(format!(
            "Unsupported URL scheme '{}' in '{}'",
            other, joined
        ))),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
