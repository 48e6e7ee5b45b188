//! Single-line text buffer with a caret, used for the branch-name prompt.
//!
//! The caret is a character index (not a byte index), so multi-byte input edits
//! correctly. The buffer never grows beyond `limit` characters.

/// Maximum branch-name length accepted by the prompt.
pub const BRANCH_NAME_LIMIT: usize = 156;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Caret position in characters, `0..=len`.
    caret: usize,
    limit: usize,
}

impl TextInput {
    /// Creates a buffer holding `value` (cut to `limit` chars) with the caret at the end.
    pub fn with_value(value: &str, limit: usize) -> Self {
        let value: String = value.chars().take(limit).collect();
        let caret = value.chars().count();
        Self { value, caret, limit }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Inserts `c` at the caret. Ignored when the buffer is full.
    pub fn insert(&mut self, c: char) {
        if self.len() >= self.limit {
            return;
        }
        let at = self.byte_index(self.caret);
        self.value.insert(at, c);
        self.caret += 1;
    }

    /// Deletes the character before the caret.
    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.caret -= 1;
        let at = self.byte_index(self.caret);
        self.value.remove(at);
    }

    /// Deletes the character under the caret.
    pub fn delete(&mut self) {
        if self.caret >= self.len() {
            return;
        }
        let at = self.byte_index(self.caret);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.caret = self.len();
    }

    /// Deletes everything before the caret.
    pub fn delete_to_start(&mut self) {
        let at = self.byte_index(self.caret);
        self.value.replace_range(..at, "");
        self.caret = 0;
    }

    /// Deletes everything from the caret to the end.
    pub fn delete_to_end(&mut self) {
        let at = self.byte_index(self.caret);
        self.value.truncate(at);
    }

    /// Deletes the word before the caret, plus any whitespace between it and the caret.
    pub fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.caret;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.caret);
        self.value.replace_range(from..to, "");
        self.caret = start;
    }

    /// Splits the value at the caret: (before, char under caret, after).
    pub fn split_at_caret(&self) -> (&str, Option<char>, &str) {
        let at = self.byte_index(self.caret);
        let (before, rest) = self.value.split_at(at);
        let mut chars = rest.chars();
        let under = chars.next();
        (before, under, chars.as_str())
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}
