use std::time::Instant;

use super::field_input::FieldInput;
use crate::config::Config;
use crate::form::{SearchCriteria, SearchField};

/// Application state
pub struct App {
    pub fields: Vec<FieldInput>,
    pub focus: SearchField,
    /// One-line message under the form (config warning, validation error)
    pub status: Option<String>,
    pub should_quit: bool,
    output: Option<SearchCriteria>,
    dirty: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            fields: SearchField::ALL
                .iter()
                .map(|field| FieldInput::new(*field, &config.suggest))
                .collect(),
            focus: SearchField::College,
            status: None,
            should_quit: false,
            output: None,
            dirty: true,
        }
    }

    pub fn field(&self, field: SearchField) -> &FieldInput {
        &self.fields[field.index()]
    }

    pub fn field_mut(&mut self, field: SearchField) -> &mut FieldInput {
        &mut self.fields[field.index()]
    }

    pub fn focused(&self) -> &FieldInput {
        self.field(self.focus)
    }

    pub fn focused_mut(&mut self) -> &mut FieldInput {
        self.field_mut(self.focus)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Criteria accepted on submit, if the form was submitted
    pub fn output(&self) -> Option<&SearchCriteria> {
        self.output.as_ref()
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Fire due fetches and apply worker responses for every field.
    ///
    /// Returns true if anything visible changed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for input in &mut self.fields {
            changed |= input.suggest.tick_at(now);
            changed |= input.poll_responses();
        }
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn criteria(&self) -> SearchCriteria {
        let app = self;
        SearchCriteria::from_fields(move |field| app.field(field).text())
    }

    /// Validate the form and quit with its criteria, or show why not.
    pub fn submit(&mut self) -> bool {
        let criteria = self.criteria();
        match criteria.validate() {
            Ok(()) => {
                #[cfg(debug_assertions)]
                log::debug!("Submitting search: {:?}", criteria);
                self.status = None;
                self.output = Some(criteria);
                self.should_quit = true;
                true
            }
            Err(message) => {
                self.status = Some(message.to_string());
                false
            }
        }
    }
}
