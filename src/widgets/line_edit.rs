//! Shared single-line editor state backing the text widgets.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone)]
pub struct LineEdit {
    text: String,
    cursor: usize,
}

impl LineEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> u16 {
        self.text[..self.cursor].width() as u16
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        // Skip trailing whitespace
        while pos > 0 && self.text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        // Skip word characters
        while pos > 0 && self.text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }

    /// Apply an editing key. Returns whether the text changed (cursor-only
    /// movement does not count).
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let before = self.text.len();
                self.delete_word_back();
                before != self.text.len()
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let changed = !self.text.is_empty();
                self.clear();
                changed
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                let before = self.text.len();
                self.delete_back();
                before != self.text.len()
            }
            KeyCode::Delete => {
                let before = self.text.len();
                self.delete_forward();
                before != self.text.len()
            }
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn insert_and_delete_respect_char_boundaries() {
        let mut edit = LineEdit::new();
        for c in "héllo".chars() {
            edit.insert_char(c);
        }
        assert_eq!(edit.text(), "héllo");
        edit.delete_back();
        assert_eq!(edit.text(), "héll");
        edit.move_home();
        edit.move_right();
        edit.delete_forward();
        assert_eq!(edit.text(), "hll");
    }

    #[test]
    fn delete_word_back_eats_one_word() {
        let mut edit = LineEdit::new();
        edit.set_text("hello big world");
        edit.delete_word_back();
        assert_eq!(edit.text(), "hello big ");
        edit.delete_word_back();
        assert_eq!(edit.text(), "hello ");
    }

    #[test]
    fn handle_key_reports_changes() {
        let mut edit = LineEdit::new();
        assert!(edit.handle_key(&press(KeyCode::Char('a'))));
        assert!(!edit.handle_key(&press(KeyCode::Left)));
        assert!(edit.handle_key(&press(KeyCode::Delete)));
        assert!(!edit.handle_key(&press(KeyCode::Backspace)), "nothing left");
    }

    #[test]
    fn cursor_column_counts_display_width() {
        let mut edit = LineEdit::new();
        edit.set_text("日本");
        assert_eq!(edit.cursor_column(), 4);
        edit.move_left();
        assert_eq!(edit.cursor_column(), 2);
    }
}
