// Configuration type definitions

use serde::Deserialize;

use crate::suggest::{DEFAULT_DEBOUNCE_MS, MIN_QUERY_LEN};

fn default_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_min_query_len() -> usize {
    MIN_QUERY_LEN
}

fn default_college_endpoint() -> String {
    "api/colleges/autocomplete/".to_string()
}

fn default_city_endpoint() -> String {
    "api/cities/autocomplete/".to_string()
}

fn default_program_endpoint() -> String {
    "api/programs/autocomplete/".to_string()
}

/// Backend connection section
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Root URL the endpoint paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: default_base_url(),
            token: None,
        }
    }
}

/// Autocomplete timing section
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestConfig {
    /// Quiet period after the last keystroke before fetching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Shortest query (in chars) that reaches the backend
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        SuggestConfig {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

/// Autocomplete endpoint paths, one per form field
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_college_endpoint")]
    pub college: String,
    #[serde(default = "default_city_endpoint")]
    pub city: String,
    #[serde(default = "default_program_endpoint")]
    pub program: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        EndpointsConfig {
            college: default_college_endpoint(),
            city: default_city_endpoint(),
            program: default_program_endpoint(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

impl Config {
    /// Apply command line overrides on top of the file values.
    pub fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.backend.base_url = base_url;
        }
        if token.is_some() {
            self.backend.token = token;
        }
        self
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
