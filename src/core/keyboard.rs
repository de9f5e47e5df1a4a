// File: src/core/keyboard.rs
use crate::core::digraph::Transliterator;
use strum_macros::{AsRefStr, Display};

pub const DELETE_KEY: &str = "Delete";
pub const CLEAR_KEY: &str = "AC";

pub static NORMAL_KEYS: [&str; 28] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z", DELETE_KEY, CLEAR_KEY,
];

// The blank and lone-space slots pad the grid; they type nothing.
pub static DIGRAPH_KEYS: [&str; 14] = [
    "ch", "ae", "eo", "kh", "ng", "oo", "sh", "th", "", " ", "{", "}", DELETE_KEY, CLEAR_KEY,
];

pub static SPECIAL_KEYS: [&str; 28] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "/", ":", ";", "(", ")", "$", "&", "@",
    "\"", ".", ",", "?", "!", "'", "*", DELETE_KEY, CLEAR_KEY,
];

/// The three layouts of the glyph keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum KeyboardMode {
    #[default]
    Normal,
    Digraph,
    Special,
}

impl KeyboardMode {
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            KeyboardMode::Normal => &NORMAL_KEYS,
            KeyboardMode::Digraph => &DIGRAPH_KEYS,
            KeyboardMode::Special => &SPECIAL_KEYS,
        }
    }

    /// Mode reached by tapping the mode button. The digraph layout is skipped
    /// while digraph substitution is inactive.
    pub fn next(self, digraphs_active: bool) -> Self {
        match self {
            KeyboardMode::Normal if digraphs_active => KeyboardMode::Digraph,
            KeyboardMode::Normal => KeyboardMode::Special,
            KeyboardMode::Digraph => KeyboardMode::Special,
            KeyboardMode::Special => KeyboardMode::Normal,
        }
    }

    /// Drops out of the digraph layout once digraphs stop being available.
    pub fn reconcile(self, digraphs_active: bool) -> Self {
        if self == KeyboardMode::Digraph && !digraphs_active {
            KeyboardMode::Normal
        } else {
            self
        }
    }
}

/// Caption for `key` in the given layout. `show_english` renders the plain
/// uppercase letters instead of glyph captions.
pub fn caption(key: &str, mode: KeyboardMode, show_english: bool, translit: &Transliterator) -> String {
    if show_english {
        key.to_uppercase()
    } else if mode == KeyboardMode::Digraph {
        translit.key_caption(key)
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fonts::FontDescriptor;

    #[test]
    fn cycle_with_digraphs() {
        let mode = KeyboardMode::Normal.next(true);
        assert_eq!(mode, KeyboardMode::Digraph);
        let mode = mode.next(true);
        assert_eq!(mode, KeyboardMode::Special);
        assert_eq!(mode.next(true), KeyboardMode::Normal);
    }

    #[test]
    fn cycle_skips_digraph_layout() {
        assert_eq!(KeyboardMode::Normal.next(false), KeyboardMode::Special);
    }

    #[test]
    fn reconcile_leaves_digraph_layout() {
        assert_eq!(KeyboardMode::Digraph.reconcile(false), KeyboardMode::Normal);
        assert_eq!(KeyboardMode::Digraph.reconcile(true), KeyboardMode::Digraph);
        assert_eq!(KeyboardMode::Special.reconcile(false), KeyboardMode::Special);
    }

    #[test]
    fn mode_labels() {
        assert_eq!(KeyboardMode::Digraph.to_string(), "DIGRAPH");
        assert_eq!(KeyboardMode::Normal.as_ref(), "NORMAL");
    }

    #[test]
    fn captions() {
        let t = Transliterator::new(true, FontDescriptor::default_font());
        assert_eq!(caption("th", KeyboardMode::Digraph, false, &t), "\u{E007}");
        assert_eq!(caption("th", KeyboardMode::Digraph, true, &t), "TH");
        assert_eq!(caption("q", KeyboardMode::Normal, false, &t), "q");
    }
}
