//! State management for the message input field.

/// Maximum allowed draft length in characters.
const MAX_INPUT_LENGTH: usize = 2000;

/// State for the message composition input field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageInputState {
    /// The current text being composed.
    text: String,
    /// Cursor position (character index, not byte).
    cursor_position: usize,
}

impl MessageInputState {
    /// Returns the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cursor position (character index).
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inserts a character at the current cursor position.
    /// Returns false if the input would exceed the maximum length.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_INPUT_LENGTH {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Deletes the character at the cursor position (delete key).
    pub fn delete_char_at(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Moves the cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Moves the cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            self.cursor_position += 1;
        }
    }

    /// Moves the cursor to the beginning of the text.
    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Moves the cursor to the end of the text.
    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    /// Clears all text and resets cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    /// Appends a mention token at the end of the draft, separated from
    /// existing text by a space and followed by one, and moves the cursor
    /// to the end. Returns false if the result would exceed the maximum length.
    pub fn append_mention(&mut self, token: &str) -> bool {
        let needs_separator = self
            .text
            .chars()
            .last()
            .is_some_and(|ch| !ch.is_whitespace());

        let appended = if needs_separator {
            format!(" {token} ")
        } else {
            format!("{token} ")
        };

        if self.text.chars().count() + appended.chars().count() > MAX_INPUT_LENGTH {
            return false;
        }

        self.text.push_str(&appended);
        self.move_cursor_end();
        true
    }

    /// Converts character index to byte index.
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
