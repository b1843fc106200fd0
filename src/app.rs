mod events;
mod field_input;
mod render;
mod state;

// Re-export public types
pub use field_input::{FieldInput, MAX_VISIBLE_SUGGESTIONS};
pub use render::{NO_MATCHES_TEXT, PopupContent, SEARCHING_TEXT, popup_content};
pub use state::App;
