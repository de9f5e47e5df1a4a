// File: src/core/alphabet.rs
use crate::core::types::{DigraphEntry, LetterCategory, LetterEntry};

const fn letter(name: &'static str, symbol: &'static str) -> LetterEntry {
    LetterEntry { name, symbol, category: LetterCategory::Standard }
}

const fn number(name: &'static str, symbol: &'static str) -> LetterEntry {
    LetterEntry { name, symbol, category: LetterCategory::Number }
}

const fn special(name: &'static str, symbol: &'static str) -> LetterEntry {
    LetterEntry { name, symbol, category: LetterCategory::Special }
}

const fn digraph(name: &'static str, symbol_output: &'static str, symbol_font: char) -> DigraphEntry {
    DigraphEntry { name, symbol_output, symbol_font }
}

pub static STANDARD_LETTERS: [LetterEntry; 26] = [
    letter("Aurek", "A"),
    letter("Besh", "B"),
    letter("Cresh", "C"),
    letter("Dorn", "D"),
    letter("Esk", "E"),
    letter("Forn", "F"),
    letter("Grek", "G"),
    letter("Herf", "H"),
    letter("Isk", "I"),
    letter("Jenth", "J"),
    letter("Krill", "K"),
    letter("Leth", "L"),
    letter("Mern", "M"),
    letter("Nern", "N"),
    letter("Osk", "O"),
    letter("Peth", "P"),
    letter("Qek", "Q"),
    letter("Resh", "R"),
    letter("Senth", "S"),
    letter("Trill", "T"),
    letter("Usk", "U"),
    letter("Vev", "V"),
    letter("Wesk", "W"),
    letter("Xesh", "X"),
    letter("Yirt", "Y"),
    letter("Zerek", "Z"),
];

/// Declaration order is the substitution order used by the rewriter.
/// Font codepoints live in the Private Use Area, U+E000 onwards.
pub static DIGRAPHS: [DigraphEntry; 8] = [
    digraph("Cherek", "CH", '\u{E000}'),
    digraph("Enth", "AE", '\u{E001}'),
    digraph("Onith", "EO", '\u{E002}'),
    digraph("Krenth", "KH", '\u{E003}'),
    digraph("Nen", "NG", '\u{E004}'),
    digraph("Orenth", "OO", '\u{E005}'),
    digraph("Shen", "SH", '\u{E006}'),
    digraph("Thesh", "TH", '\u{E007}'),
];

pub static NUMBERS: [LetterEntry; 10] = [
    number("One", "1"),
    number("Two", "2"),
    number("Three", "3"),
    number("Four", "4"),
    number("Five", "5"),
    number("Six", "6"),
    number("Seven", "7"),
    number("Eight", "8"),
    number("Nine", "9"),
    number("Zero", "0"),
];

pub static SPECIALS: [LetterEntry; 16] = [
    special("Dash", "-"),
    special("Slash", "/"),
    special("Colon", ":"),
    special("Semicolon", ";"),
    special("Left Parenthesis", "("),
    special("Right Parenthesis", ")"),
    special("Dollar", "$"),
    special("Ampersand", "&"),
    special("At", "@"),
    special("Double Quote", "\""),
    special("Period", "."),
    special("Comma", ","),
    special("Question Mark", "?"),
    special("Exclamation Mark", "!"),
    special("Single Quote", "'"),
    special("Asterisk", "*"),
];

/// Every letter in browsing order: standard, digraph, number, special.
pub fn all_letters() -> impl Iterator<Item = LetterEntry> {
    STANDARD_LETTERS
        .iter()
        .copied()
        .chain(DIGRAPHS.iter().map(DigraphEntry::as_letter))
        .chain(NUMBERS.iter().copied())
        .chain(SPECIALS.iter().copied())
}

pub fn letters_in(category: LetterCategory) -> Vec<LetterEntry> {
    all_letters().filter(|l| l.category == category).collect()
}

/// Looks a letter up by its Aurebesh name, ignoring case.
pub fn find_by_name(name: &str) -> Option<LetterEntry> {
    all_letters().find(|l| l.name.eq_ignore_ascii_case(name))
}

pub fn find_digraph(symbol_output: &str) -> Option<&'static DigraphEntry> {
    DIGRAPHS
        .iter()
        .find(|d| d.symbol_output.eq_ignore_ascii_case(symbol_output))
}

/// True for characters the glyph fonts can draw: letters, digits, the special
/// table, and the space separating words.
pub fn is_supported_char(c: char) -> bool {
    if c == ' ' || c.is_ascii_alphanumeric() {
        return true;
    }
    SPECIALS.iter().any(|s| s.symbol.starts_with(c) && s.symbol.len() == c.len_utf8())
}

/// Alphabet browser filter.
///
/// An empty query keeps everything. Otherwise a letter matches when its name
/// or symbol contains the query, or its symbol starts with the query's first
/// character. Digraphs additionally match on the first character of their name.
pub fn search(query: &str) -> Vec<LetterEntry> {
    let query = query.to_lowercase();
    let Some(first) = query.chars().next() else {
        return all_letters().collect();
    };

    all_letters()
        .filter(|l| {
            let name = l.name.to_lowercase();
            let symbol = l.symbol.to_lowercase();
            name.contains(&query)
                || symbol.contains(&query)
                || symbol.starts_with(first)
                || (l.category == LetterCategory::Digraph && name.starts_with(first))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_sizes() {
        assert_eq!(letters_in(LetterCategory::Standard).len(), 26);
        assert_eq!(letters_in(LetterCategory::Digraph).len(), 8);
        assert_eq!(letters_in(LetterCategory::Number).len(), 10);
        assert_eq!(letters_in(LetterCategory::Special).len(), 16);
    }

    #[test]
    fn names_are_globally_unique() {
        let names: HashSet<_> = all_letters().map(|l| l.name).collect();
        assert_eq!(names.len(), all_letters().count());
    }

    #[test]
    fn symbols_are_unique_per_category() {
        for category in [
            LetterCategory::Standard,
            LetterCategory::Digraph,
            LetterCategory::Number,
            LetterCategory::Special,
        ] {
            let letters = letters_in(category);
            let symbols: HashSet<_> = letters.iter().map(|l| l.symbol).collect();
            assert_eq!(symbols.len(), letters.len(), "duplicate symbol in {}", category);
        }
    }

    #[test]
    fn digraph_outputs_are_two_ascii_letters() {
        for d in DIGRAPHS.iter() {
            assert_eq!(d.symbol_output.len(), 2);
            assert!(d.symbol_output.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn digraph_font_glyphs_do_not_collide() {
        let glyphs: HashSet<_> = DIGRAPHS.iter().map(|d| d.symbol_font).collect();
        assert_eq!(glyphs.len(), DIGRAPHS.len());
        for g in glyphs {
            assert!(!is_supported_char(g));
            assert!(('\u{E000}'..='\u{F8FF}').contains(&g));
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(find_by_name("thesh").map(|l| l.symbol), Some("TH"));
        assert_eq!(find_by_name("Aurek").map(|l| l.symbol), Some("A"));
        assert!(find_by_name("Wookiee").is_none());
        assert_eq!(find_digraph("ng").map(|d| d.name), Some("Nen"));
    }

    #[test]
    fn search_filters() {
        assert_eq!(search("").len(), 60);

        let hits = search("besh");
        assert!(hits.iter().any(|l| l.name == "Besh"));
        assert!(hits.iter().all(|l| l.name != "Aurek"));

        // digraph names match on their first letter
        let hits = search("k");
        assert!(hits.iter().any(|l| l.name == "Krenth"));
        assert!(hits.iter().any(|l| l.name == "Krill"));
    }
}
