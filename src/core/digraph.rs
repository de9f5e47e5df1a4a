// File: src/core/digraph.rs
use crate::core::alphabet::DIGRAPHS;
use crate::core::fonts::FontDescriptor;
use crate::core::types::DigraphEntry;

/// Rewrites text between its plain English form and the form the glyph fonts
/// expect, where each digraph is a single private-use character.
#[derive(Debug, Clone, Copy)]
pub struct DigraphRewriter {
    table: &'static [DigraphEntry],
}

impl Default for DigraphRewriter {
    fn default() -> Self {
        Self::new(&DIGRAPHS)
    }
}

impl DigraphRewriter {
    pub fn new(table: &'static [DigraphEntry]) -> Self {
        Self { table }
    }

    /// Collapses every digraph to its font glyph.
    ///
    /// Entries are applied one after another in table order, each one scanning
    /// the output of the previous one left to right. Matching ignores ASCII
    /// case; characters that are not part of a match are kept as they are.
    pub fn encode(&self, text: &str) -> String {
        let mut result = text.to_string();
        for entry in self.table {
            result = replace_pair(&result, entry);
        }
        result
    }

    /// Expands font glyphs back to their two-letter form. The result is always
    /// uppercase.
    pub fn decode(&self, text: &str) -> String {
        let mut result = text.to_uppercase();
        for entry in self.table {
            if result.contains(entry.symbol_font) {
                result = result.replace(entry.symbol_font, entry.symbol_output);
            }
        }
        result
    }

    pub fn glyph_for(&self, pair: &str) -> Option<char> {
        self.table
            .iter()
            .find(|e| e.symbol_output.eq_ignore_ascii_case(pair))
            .map(|e| e.symbol_font)
    }
}

fn replace_pair(text: &str, entry: &DigraphEntry) -> String {
    let mut pattern = entry.symbol_output.chars();
    let (Some(first), Some(second)) = (pattern.next(), pattern.next()) else {
        return text.to_string();
    };

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.eq_ignore_ascii_case(&first) {
            if let Some(&next_c) = chars.peek() {
                if next_c.eq_ignore_ascii_case(&second) {
                    result.push(entry.symbol_font);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

/// Applies the rewriter only when digraphs are switched on and the active font
/// can draw them.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator {
    rewriter: DigraphRewriter,
    active: bool,
}

impl Transliterator {
    pub fn new(digraph_enabled: bool, font: &FontDescriptor) -> Self {
        Self {
            rewriter: DigraphRewriter::default(),
            active: digraph_enabled && font.supports_digraphs,
        }
    }

    /// Whether digraph substitution is in effect.
    pub fn digraphs_active(&self) -> bool {
        self.active
    }

    pub fn encode(&self, text: &str) -> String {
        if self.active {
            self.rewriter.encode(text)
        } else {
            text.to_string()
        }
    }

    pub fn decode(&self, text: &str) -> String {
        if self.active {
            self.rewriter.decode(text)
        } else {
            text.to_uppercase()
        }
    }

    /// Text handed to the glyph font: lowercased, then digraph-encoded.
    pub fn font_text(&self, input: &str) -> String {
        self.encode(&input.to_lowercase())
    }

    /// The uppercase English reading of `input`.
    pub fn english_text(&self, input: &str) -> String {
        self.decode(input)
    }

    /// Caption drawn on a keyboard key in glyph mode.
    pub fn key_caption(&self, key: &str) -> String {
        if self.active {
            if let Some(glyph) = self.rewriter.glyph_for(key) {
                return glyph.to_string();
            }
        }
        if key == " " {
            return String::new();
        }
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::{NUMBERS, SPECIALS};
    use quickcheck::{quickcheck, Arbitrary, Gen};

    fn active() -> Transliterator {
        Transliterator::new(true, FontDescriptor::lookup("Aurebesh").unwrap())
    }

    #[test]
    fn the_becomes_two_glyphs() {
        let out = active().font_text("the");
        assert_eq!(out, "\u{E007}e");
        assert_eq!(out.chars().count(), 2);
    }

    #[test]
    fn encode_ignores_case() {
        let r = DigraphRewriter::default();
        assert_eq!(r.encode("Thing"), "\u{E007}i\u{E004}");
        assert_eq!(r.encode("tH"), "\u{E007}");
    }

    #[test]
    fn encode_keeps_unmatched_case_and_passthrough() {
        let r = DigraphRewriter::default();
        assert_eq!(r.encode("Xyz 42!"), "Xyz 42!");
        assert_eq!(r.encode("é\u{1F600}"), "é\u{1F600}");
    }

    #[test]
    fn entries_apply_in_table_order() {
        let r = DigraphRewriter::default();
        // AE is declared before EO, so "aeo" keeps the trailing o
        assert_eq!(r.encode("aeo"), "\u{E001}o");
        // overlapping OO matches resolve left to right
        assert_eq!(r.encode("ooo"), "\u{E005}o");
    }

    #[test]
    fn decode_uppercases() {
        let r = DigraphRewriter::default();
        assert_eq!(r.decode("\u{E007}e"), "THE");
        assert_eq!(r.decode("hello"), "HELLO");
    }

    #[test]
    fn inactive_gate_is_identity_on_encode() {
        let font = FontDescriptor::lookup("AurebeshPixel").unwrap();
        let t = Transliterator::new(true, font);
        assert!(!t.digraphs_active());
        assert_eq!(t.encode("The Shining"), "The Shining");
        assert_eq!(t.decode("the"), "THE");

        let t = Transliterator::new(false, FontDescriptor::lookup("Aurebesh").unwrap());
        assert_eq!(t.encode("chess"), "chess");
    }

    #[test]
    fn key_captions() {
        let t = active();
        assert_eq!(t.key_caption("ch"), "\u{E000}");
        assert_eq!(t.key_caption(" "), "");
        assert_eq!(t.key_caption("a"), "a");

        let off = Transliterator::new(false, FontDescriptor::default_font());
        assert_eq!(off.key_caption("ch"), "ch");
    }

    #[derive(Debug, Clone)]
    struct AlphabetText(String);

    impl Arbitrary for AlphabetText {
        fn arbitrary(g: &mut Gen) -> Self {
            let mut pool: Vec<char> = ('a'..='z').chain('A'..='Z').collect();
            pool.extend(NUMBERS.iter().flat_map(|n| n.symbol.chars()));
            pool.extend(SPECIALS.iter().flat_map(|s| s.symbol.chars()));
            pool.push(' ');
            let len = usize::arbitrary(g) % 40;
            Self((0..len).map(|_| *g.choose(&pool).unwrap()).collect())
        }
    }

    quickcheck! {
        fn decode_inverts_encode(s: AlphabetText) -> bool {
            let t = active();
            t.decode(&t.encode(&s.0)) == s.0.to_uppercase()
        }

        fn encode_is_stable(s: AlphabetText) -> bool {
            let t = active();
            let once = t.encode(&s.0);
            t.encode(&once) == once
        }

        fn encode_never_grows(s: AlphabetText) -> bool {
            active().encode(&s.0).chars().count() <= s.0.chars().count()
        }

        fn disabled_encode_is_identity(s: String) -> bool {
            let t = Transliterator::new(false, FontDescriptor::default_font());
            t.encode(&s) == s
        }
    }
}
