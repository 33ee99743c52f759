//! Single-line text buffer used by prompts and editor insert mode.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a printable character. Control characters are ignored.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Remove trailing whitespace, then the word before it.
    pub fn delete_word(&mut self) {
        let trimmed = self.text.trim_end_matches(char::is_whitespace).len();
        self.text.truncate(trimmed);
        let word_start = self
            .text
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.text.truncate(word_start);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Take the text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}
