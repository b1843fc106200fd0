use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use super::field_input::{FieldInput, MAX_VISIBLE_SUGGESTIONS};
use super::state::App;
use crate::form::SearchField;

// Suggestion popup display constants
const POPUP_BORDER_HEIGHT: u16 = 2;
const INPUT_HEIGHT: u16 = 3;

pub const SEARCHING_TEXT: &str = "Searching...";
pub const NO_MATCHES_TEXT: &str = "No exact matches found, keep typing...";

const HELP_TEXT: &str =
    " Tab: next field | ↑/↓: choose | Enter: select / search | Esc: back | Ctrl+C: quit";

/// What the popup under the focused input shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupContent<'a> {
    Searching,
    NoMatches,
    Suggestions(&'a [String]),
}

/// Decide the popup content for an input, or `None` when it stays hidden.
pub fn popup_content(input: &FieldInput, min_query_len: usize) -> Option<PopupContent<'_>> {
    let suggest = &input.suggest;
    if suggest.loading {
        return Some(PopupContent::Searching);
    }
    if !suggest.suggestions.is_empty() {
        return Some(PopupContent::Suggestions(&suggest.suggestions));
    }
    if suggest.query.chars().count() >= min_query_len {
        return Some(PopupContent::NoMatches);
    }
    None
}

/// First row to draw so the highlight fits in `rows` visible rows.
///
/// A popup clipped by a short terminal can show fewer rows than the input
/// scrolled for.
fn visible_start(scroll_offset: usize, highlighted: Option<usize>, rows: usize) -> usize {
    match highlighted {
        Some(i) if rows > 0 && i >= scroll_offset + rows => i + 1 - rows,
        Some(i) if i < scroll_offset => i,
        _ => scroll_offset,
    }
}

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(1),            // Title
            Constraint::Length(INPUT_HEIGHT), // College
            Constraint::Length(INPUT_HEIGHT), // City
            Constraint::Length(INPUT_HEIGHT), // Program
            Constraint::Min(0),               // Space for the popup
            Constraint::Length(1),            // Status line
            Constraint::Length(1),            // Help line
        ])
        .split(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Find Your Perfect College",
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            layout[0],
        );

        for field in SearchField::ALL {
            let area = layout[1 + field.index()];
            self.render_input_field(frame, field, area);
        }

        self.render_status_line(frame, layout[5]);
        frame.render_widget(
            Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
            layout[6],
        );

        // Render the popup last so it overlays the inputs below the focused one
        let focused_area = layout[1 + self.focus.index()];
        let bottom = layout[5].y;
        self.render_suggestion_popup(frame, focused_area, bottom);
    }

    fn render_input_field(&mut self, frame: &mut Frame, field: SearchField, area: Rect) {
        let focused = self.focus == field;
        let input = self.field_mut(field);

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        input.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label()))
                .border_style(Style::default().fg(border_color)),
        );

        // Hide the cursor on unfocused inputs
        let cursor_style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        input.textarea.set_cursor_style(cursor_style);

        frame.render_widget(&input.textarea, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref status) = self.status {
            frame.render_widget(
                Paragraph::new(format!(" {}", status)).style(Style::default().fg(Color::Yellow)),
                area,
            );
        }
    }

    /// Render the suggestion popup directly under the focused input
    fn render_suggestion_popup(&self, frame: &mut Frame, input_area: Rect, bottom: u16) {
        let input = self.focused();
        let min_query_len = input.suggest.min_query_len();
        let Some(content) = popup_content(input, min_query_len) else {
            return;
        };

        let row_count = match content {
            PopupContent::Suggestions(suggestions) => suggestions.len().min(MAX_VISIBLE_SUGGESTIONS),
            PopupContent::Searching | PopupContent::NoMatches => 1,
        };

        let popup_y = input_area.y + input_area.height;
        let available = bottom.saturating_sub(popup_y);
        let wanted = row_count as u16 + POPUP_BORDER_HEIGHT;
        let popup_height = wanted.min(available);
        if popup_height <= POPUP_BORDER_HEIGHT {
            return;
        }

        let items: Vec<ListItem> = match content {
            PopupContent::Searching => vec![ListItem::new(Span::styled(
                SEARCHING_TEXT,
                Style::default().fg(Color::Gray),
            ))],
            PopupContent::NoMatches => vec![ListItem::new(Span::styled(
                NO_MATCHES_TEXT,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))],
            PopupContent::Suggestions(suggestions) => {
                let rows = (popup_height - POPUP_BORDER_HEIGHT) as usize;
                let start = visible_start(input.scroll_offset(), input.highlighted, rows);
                suggestions
                    .iter()
                    .enumerate()
                    .skip(start)
                    .take(rows)
                    .map(|(i, suggestion)| {
                        let style = if input.highlighted == Some(i) {
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        };
                        ListItem::new(Line::from(Span::styled(format!(" {} ", suggestion), style)))
                    })
                    .collect()
            }
        };

        let popup_area = Rect {
            x: input_area.x,
            y: popup_y,
            width: input_area.width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(list, popup_area);
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
