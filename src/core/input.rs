// File: src/core/input.rs
use crate::core::keyboard::{CLEAR_KEY, DELETE_KEY};

/// The translation input. Lives in memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputText {
    text: String,
}

impl InputText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Removes the last character. No-op on an empty buffer.
    pub fn delete_last(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Applies a glyph keyboard key press.
    ///
    /// `Delete` and `AC` edit the buffer; the blank and lone-space padding keys
    /// are ignored; anything else is appended. Returns whether the buffer changed.
    pub fn press_key(&mut self, key: &str) -> bool {
        match key {
            DELETE_KEY => self.delete_last().is_some(),
            CLEAR_KEY => {
                let changed = !self.text.is_empty();
                self.clear();
                changed
            }
            "" | " " => false,
            k => {
                self.text.push_str(k);
                true
            }
        }
    }

    /// The wide space bar under the key grid.
    pub fn press_space(&mut self) {
        self.text.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_editing() {
        let mut input = InputText::new();
        assert!(input.press_key("t"));
        assert!(input.press_key("h"));
        input.press_space();
        assert!(input.press_key("ng"));
        assert_eq!(input.as_str(), "th ng");

        assert!(input.press_key(DELETE_KEY));
        assert_eq!(input.as_str(), "th n");

        assert!(!input.press_key(" "));
        assert!(!input.press_key(""));

        assert!(input.press_key(CLEAR_KEY));
        assert!(input.is_empty());
        assert!(!input.press_key(CLEAR_KEY));
        assert!(!input.press_key(DELETE_KEY));
    }
}
