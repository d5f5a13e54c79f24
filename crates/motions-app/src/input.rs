// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Key;

/// Single-line text buffer with a character cursor. Positions are counted
/// in chars, never bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: Vec<char>,
    cursor: usize,
    placeholder: &'static str,
    char_limit: usize,
    focused: bool,
}

impl TextInput {
    /// A `char_limit` of zero means unlimited.
    pub fn new(placeholder: &'static str, char_limit: usize) -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            placeholder,
            char_limit,
            focused: false,
        }
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_value(&mut self, value: &str) {
        let mut chars: Vec<char> = value.chars().collect();
        if self.char_limit > 0 {
            chars.truncate(self.char_limit);
        }
        self.cursor = chars.len();
        self.value = chars;
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Applies an editing key. Returns whether the key was consumed; blurred
    /// inputs consume nothing.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.focused {
            return false;
        }

        match key {
            Key::Char(c) => self.insert(c),
            Key::Backspace | Key::Ctrl('h') => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            Key::Delete | Key::Ctrl('d') => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            Key::Left | Key::Ctrl('b') => self.cursor = self.cursor.saturating_sub(1),
            Key::Right | Key::Ctrl('f') => self.cursor = (self.cursor + 1).min(self.value.len()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End | Key::Ctrl('e') => self.cursor = self.value.len(),
            Key::Ctrl('u') => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
            }
            Key::Ctrl('k') => self.value.truncate(self.cursor),
            Key::Ctrl('w') => self.delete_word_backward(),
            _ => return false,
        }
        true
    }

    fn insert(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
    }

    fn delete_word_backward(&mut self) {
        let mut start = self.cursor;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }
}

#[cfg(test)]
mod tests {
    use super::TextInput;
    use crate::Key;

    fn focused(placeholder: &'static str, limit: usize) -> TextInput {
        let mut input = TextInput::new(placeholder, limit);
        input.focus();
        input
    }

    fn type_str(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.handle_key(Key::Char(c));
        }
    }

    #[test]
    fn blurred_input_ignores_keys() {
        let mut input = TextInput::new("y/n", 5);
        assert!(!input.handle_key(Key::Char('y')));
        assert!(input.is_empty());
    }

    #[test]
    fn typing_respects_char_limit() {
        let mut input = focused("y/n", 5);
        type_str(&mut input, "yes please");
        assert_eq!(input.value(), "yes p");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn cursor_editing_inserts_mid_string() {
        let mut input = focused("Motion Keys", 64);
        type_str(&mut input, "ciw");
        input.handle_key(Key::Left);
        input.handle_key(Key::Left);
        input.handle_key(Key::Backspace);
        type_str(&mut input, "da");
        assert_eq!(input.value(), "daiw");

        input.handle_key(Key::Home);
        input.handle_key(Key::Delete);
        assert_eq!(input.value(), "aiw");

        input.handle_key(Key::End);
        input.handle_key(Key::Right);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn kill_line_and_word_shortcuts() {
        let mut input = focused("Description of Motion", 32);
        type_str(&mut input, "Jump to mark");
        input.handle_key(Key::Ctrl('w'));
        assert_eq!(input.value(), "Jump to ");

        input.handle_key(Key::Ctrl('a'));
        input.handle_key(Key::Ctrl('k'));
        assert!(input.is_empty());

        type_str(&mut input, "abc");
        input.handle_key(Key::Left);
        input.handle_key(Key::Ctrl('u'));
        assert_eq!(input.value(), "c");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn set_value_moves_cursor_to_end_and_reset_clears() {
        let mut input = TextInput::new("y/n", 5);
        input.set_value("yesyesyes");
        assert_eq!(input.value(), "yesye");
        assert_eq!(input.cursor(), 5);

        input.reset();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let mut input = focused("Motion Keys", 3);
        type_str(&mut input, "←→↑↓");
        assert_eq!(input.value(), "←→↑");
        input.handle_key(Key::Backspace);
        assert_eq!(input.value(), "←→");
    }
}
