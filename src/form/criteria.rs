use serde::Serialize;

use super::SearchField;

/// Shown when the user submits a form with every field blank
pub const EMPTY_FORM_MESSAGE: &str = "Please fill in at least one field.";

/// Values submitted from the detailed search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub name: String,
    pub city: String,
    pub program: String,
}

impl SearchCriteria {
    /// Build criteria from a field lookup, trimming surrounding whitespace.
    pub fn from_fields<'a>(mut value_of: impl FnMut(SearchField) -> &'a str) -> Self {
        Self {
            name: value_of(SearchField::College).trim().to_string(),
            city: value_of(SearchField::City).trim().to_string(),
            program: value_of(SearchField::Program).trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.city.is_empty() && self.program.is_empty()
    }

    /// Reject a form where nothing was filled in.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.is_empty() {
            return Err(EMPTY_FORM_MESSAGE);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
