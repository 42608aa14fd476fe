//! Single-line query input with a movable cursor.
//!
//! The input does not own the text; it receives the current value and
//! reports edits, so all state stays in `ViewState`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

const PLACEHOLDER: &str = "Enter city name";

/// What a keystroke did to the input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Changed(String),
    Submitted,
}

#[derive(Debug, Default)]
pub struct QueryInput {
    /// Cursor position (byte index into the value).
    cursor: usize,
}

impl QueryInput {
    pub fn at_end(value: &str) -> Self {
        Self {
            cursor: value.len(),
        }
    }

    pub fn move_to_end(&mut self, value: &str) {
        self.cursor = value.len();
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
    }

    fn move_cursor_left(&mut self, value: &str) {
        if self.cursor > 0 {
            let mut new_pos = self.cursor - 1;
            while new_pos > 0 && !value.is_char_boundary(new_pos) {
                new_pos -= 1;
            }
            self.cursor = new_pos;
        }
    }

    fn move_cursor_right(&mut self, value: &str) {
        if self.cursor < value.len() {
            let mut new_pos = self.cursor + 1;
            while new_pos < value.len() && !value.is_char_boundary(new_pos) {
                new_pos += 1;
            }
            self.cursor = new_pos;
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }

        let before_cursor = &value[..self.cursor];
        let char_start = before_cursor
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);

        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..char_start]);
        new_value.push_str(&value[self.cursor..]);
        self.cursor = char_start;
        Some(new_value)
    }

    fn delete_char_at(&self, value: &str) -> Option<String> {
        if self.cursor >= value.len() {
            return None;
        }

        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor]);

        let after_cursor = &value[self.cursor..];
        if let Some((_, c)) = after_cursor.char_indices().next() {
            new_value.push_str(&value[self.cursor + c.len_utf8()..]);
        }

        Some(new_value)
    }

    pub fn handle_key(&mut self, key: &KeyEvent, value: &str) -> Option<InputEvent> {
        self.clamp_cursor(value);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some(InputEvent::Changed(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(InputEvent::Changed(self.insert_char(value, c))),
            KeyCode::Backspace => self.delete_char_before(value).map(InputEvent::Changed),
            KeyCode::Delete => self.delete_char_at(value).map(InputEvent::Changed),
            KeyCode::Left => {
                self.move_cursor_left(value);
                None
            }
            KeyCode::Right => {
                self.move_cursor_right(value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = value.len();
                None
            }
            KeyCode::Enter => Some(InputEvent::Submitted),
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, value: &str) {
        self.clamp_cursor(value);

        let display_text = if value.is_empty() { PLACEHOLDER } else { value };
        let style = if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let paragraph = Paragraph::new(display_text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(paragraph, area);

        // Cursor column is in characters, not bytes.
        let cursor_col = value[..self.cursor].chars().count() as u16;
        let cursor_x = area.x + 1 + cursor_col;
        let cursor_y = area.y + 1;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut input = QueryInput::default();

        let event = input.handle_key(&key(KeyCode::Char('a')), "");

        assert_eq!(event, Some(InputEvent::Changed("a".into())));
    }

    #[test]
    fn typing_appends_at_end() {
        let mut input = QueryInput::at_end("hello");

        let event = input.handle_key(&key(KeyCode::Char('!')), "hello");

        assert_eq!(event, Some(InputEvent::Changed("hello!".into())));
    }

    #[test]
    fn typing_in_the_middle() {
        let mut input = QueryInput::at_end("hllo");
        input.handle_key(&key(KeyCode::Home), "hllo");
        input.handle_key(&key(KeyCode::Right), "hllo");

        let event = input.handle_key(&key(KeyCode::Char('e')), "hllo");

        assert_eq!(event, Some(InputEvent::Changed("hello".into())));
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut input = QueryInput::at_end("hello");

        let event = input.handle_key(&key(KeyCode::Backspace), "hello");

        assert_eq!(event, Some(InputEvent::Changed("hell".into())));
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut input = QueryInput::default();

        let event = input.handle_key(&key(KeyCode::Backspace), "hello");

        assert_eq!(event, None);
    }

    #[test]
    fn delete_removes_at_cursor() {
        let mut input = QueryInput::default();

        let event = input.handle_key(&key(KeyCode::Delete), "hello");

        assert_eq!(event, Some(InputEvent::Changed("ello".into())));
    }

    #[test]
    fn backspace_handles_multibyte_chars() {
        let mut input = QueryInput::at_end("Zürich");

        let event = input.handle_key(&key(KeyCode::Backspace), "Zürich");

        assert_eq!(event, Some(InputEvent::Changed("Züric".into())));
    }

    #[test]
    fn enter_submits() {
        let mut input = QueryInput::at_end("pune");

        let event = input.handle_key(&key(KeyCode::Enter), "pune");

        assert_eq!(event, Some(InputEvent::Submitted));
    }

    #[test]
    fn ctrl_u_clears_the_line() {
        let mut input = QueryInput::at_end("pune");

        let event = input.handle_key(&ctrl('u'), "pune");

        assert_eq!(event, Some(InputEvent::Changed(String::new())));
    }

    #[test]
    fn cursor_clamps_when_value_shrinks_externally() {
        let mut input = QueryInput::at_end("a longer value");

        // Value was replaced behind the input's back; typing must not panic.
        let event = input.handle_key(&key(KeyCode::Char('x')), "ab");

        assert_eq!(event, Some(InputEvent::Changed("abx".into())));
    }
}
