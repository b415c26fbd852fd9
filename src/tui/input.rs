//! Input field handling for the terminal user interface.

/// A single-line text input with a cursor and active state.
///
/// The cursor counts characters, not bytes, so multi-byte input edits cleanly.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.value.remove(idx);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Empty the field, keeping its active state.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_at_cursor() {
        let mut field = InputField::with_value("tak");
        field.move_cursor_left();
        field.handle_char('s');
        assert_eq!(field.value, "task");
        field.handle_backspace();
        assert_eq!(field.value, "tak");
        field.handle_delete();
        assert_eq!(field.value, "ta");
        field.move_cursor_right();
        field.move_cursor_right();
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = InputField::new();
        for c in "café".chars() {
            field.handle_char(c);
        }
        field.handle_backspace();
        field.handle_char('e');
        assert_eq!(field.value, "cafe");
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.cursor, 0);
    }
}
