use std::time::Instant;

use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use crate::config::SuggestConfig;
use crate::form::SearchField;
use crate::suggest::{QueryChange, SuggestState};

/// Rows the suggestion popup shows at once
pub const MAX_VISIBLE_SUGGESTIONS: usize = 8;

/// One autocomplete input: text box, fetcher, and list highlight
pub struct FieldInput {
    pub field: SearchField,
    pub textarea: TextArea<'static>,
    pub suggest: SuggestState,
    /// Index into `suggest.suggestions` chosen with Up/Down
    pub highlighted: Option<usize>,
    /// First suggestion drawn in the popup
    scroll_offset: usize,
}

impl FieldInput {
    pub fn new(field: SearchField, config: &SuggestConfig) -> Self {
        let mut textarea = TextArea::default();

        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label()))
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        textarea.set_placeholder_text(field.placeholder());

        // Remove default underline from cursor line
        textarea.set_cursor_line_style(Style::default());

        Self {
            field,
            textarea,
            suggest: SuggestState::new(config.debounce_ms, config.min_query_len),
            highlighted: None,
            scroll_offset: 0,
        }
    }

    /// Current input text
    pub fn text(&self) -> &str {
        self.textarea.lines()[0].as_str()
    }

    /// Replace the whole input text, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.textarea.delete_line_by_head();
        self.textarea.delete_line_by_end();
        self.textarea.insert_str(text);
    }

    /// Feed the current text to the fetcher after an edit.
    pub fn sync_query_at(&mut self, now: Instant) -> QueryChange {
        let text = self.text().to_string();
        let change = self.suggest.on_query_change_at(&text, now);
        if change != QueryChange::Unchanged {
            self.clear_highlight();
        }
        change
    }

    /// Apply worker responses. A newly published list starts unhighlighted.
    ///
    /// Returns true if anything arrived.
    pub fn poll_responses(&mut self) -> bool {
        let awaiting = self.suggest.has_in_flight_request();
        if !self.suggest.poll_response_channel() {
            return false;
        }

        if awaiting && !self.suggest.has_in_flight_request() {
            self.clear_highlight();
        } else {
            self.clamp_highlight();
        }
        true
    }

    /// Only a list on screen can be navigated; the popup hides it while loading.
    fn can_navigate(&self) -> bool {
        !self.suggest.loading && !self.suggest.suggestions.is_empty()
    }

    /// Move the highlight down, wrapping to the top.
    pub fn select_next(&mut self) {
        if !self.can_navigate() {
            return;
        }
        let count = self.suggest.suggestions.len();
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        });
        self.scroll_to_highlight();
    }

    /// Move the highlight up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if !self.can_navigate() {
            return;
        }
        let count = self.suggest.suggestions.len();
        self.highlighted = Some(match self.highlighted {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        });
        self.scroll_to_highlight();
    }

    /// Keep the highlighted row inside the visible window.
    fn scroll_to_highlight(&mut self) {
        let Some(i) = self.highlighted else {
            self.scroll_offset = 0;
            return;
        };

        if i < self.scroll_offset {
            self.scroll_offset = i;
        } else if i >= self.scroll_offset + MAX_VISIBLE_SUGGESTIONS {
            self.scroll_offset = i + 1 - MAX_VISIBLE_SUGGESTIONS;
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn clear_highlight(&mut self) -> bool {
        self.scroll_offset = 0;
        self.highlighted.take().is_some()
    }

    /// Drop a highlight that no longer points into the list.
    pub fn clamp_highlight(&mut self) {
        if let Some(i) = self.highlighted
            && i >= self.suggest.suggestions.len()
        {
            self.clear_highlight();
        }
    }

    /// Copy the highlighted suggestion into the input.
    ///
    /// Returns false if nothing is highlighted.
    pub fn accept_highlighted(&mut self) -> bool {
        if self.suggest.loading {
            return false;
        }
        let Some(value) = self
            .highlighted
            .and_then(|i| self.suggest.suggestions.get(i))
            .cloned()
        else {
            return false;
        };

        self.set_text(&value);
        self.suggest.select_suggestion(&value);
        self.clear_highlight();
        true
    }
}
