// src/core/types.rs
use serde::Serialize;
use strum_macros::Display;

/// Which table a letter belongs to. Symbols are only unique within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum LetterCategory {
    Standard,
    Digraph,
    Number,
    Special,
}

/// One row of the alphabet: the Aurebesh letter name and the English symbol
/// the glyph fonts map it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterEntry {
    pub name: &'static str,
    pub symbol: &'static str,
    pub category: LetterCategory,
}

/// A two-letter English sequence rendered as a single glyph.
///
/// `symbol_output` is what the user reads and what gets stored ("CH").
/// `symbol_font` is the private-use codepoint the digraph-capable fonts draw
/// as the combined glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigraphEntry {
    pub name: &'static str,
    pub symbol_output: &'static str,
    pub symbol_font: char,
}

impl DigraphEntry {
    /// The plain letter view of this digraph, as listed in the alphabet.
    pub const fn as_letter(&self) -> LetterEntry {
        LetterEntry {
            name: self.name,
            symbol: self.symbol_output,
            category: LetterCategory::Digraph,
        }
    }
}
