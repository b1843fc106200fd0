use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

use super::state::App;

/// Timeout for event polling; bounds how late a debounced fetch can fire
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

impl App {
    /// Handle events and update application state
    pub fn handle_events(&mut self) -> io::Result<()> {
        // Fire due fetches and collect responses before blocking on input
        self.tick_at(Instant::now());

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                // Check that it's a key press event to avoid duplicates
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event_at(&text, Instant::now());
                }
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.handle_key_event_at(key, Instant::now());
    }

    /// Handle a key press that happened at `now`
    pub fn handle_key_event_at(&mut self, key: KeyEvent, now: Instant) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Inputs are single-line; keys the textarea would split a line on act as Enter
        let code = if is_line_break(&key) {
            KeyCode::Enter
        } else {
            key.code
        };

        match code {
            KeyCode::Tab => {
                self.focused_mut().clear_highlight();
                self.focus = self.focus.next();
            }
            KeyCode::BackTab => {
                self.focused_mut().clear_highlight();
                self.focus = self.focus.previous();
            }
            KeyCode::Down => self.focused_mut().select_next(),
            KeyCode::Up => self.focused_mut().select_previous(),
            KeyCode::Enter => {
                if !self.focused_mut().accept_highlighted() {
                    self.submit();
                }
            }
            KeyCode::Esc => {
                if !self.focused_mut().clear_highlight() {
                    self.should_quit = true;
                }
            }
            _ => self.edit_focused(key, now),
        }
    }

    /// Inserts pasted text as one edit; newlines are flattened to spaces
    pub fn handle_paste_event_at(&mut self, text: &str, now: Instant) {
        let flattened: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        let input = self.focused_mut();
        input.textarea.insert_str(&flattened);
        input.sync_query_at(now);
        self.status = None;
        self.mark_dirty();
    }

    fn edit_focused(&mut self, key: KeyEvent, now: Instant) {
        let input = self.focused_mut();
        if input.textarea.input(key) {
            input.sync_query_at(now);
            self.status = None;
        }
    }
}

/// Keys tui-textarea turns into a new line
fn is_line_break(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('\n' | '\r') => true,
        KeyCode::Char('m') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
