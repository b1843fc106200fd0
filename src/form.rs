//! Detailed search form model
//!
//! The fields a user can autocomplete and the criteria produced on submit.

mod criteria;
mod field;

pub use criteria::{EMPTY_FORM_MESSAGE, SearchCriteria};
pub use field::SearchField;
