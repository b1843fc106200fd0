//! campus-search library - Detailed college search with backend autocomplete
//!
//! This library exposes the core functionality of campus-search for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod suggest;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::Config;
