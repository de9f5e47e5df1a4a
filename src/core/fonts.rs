// File: src/core/fonts.rs
use serde::Serialize;

/// A bundled glyph font.
///
/// Digraph capability is declared here once instead of being inferred from the
/// font name. `digraph_twin` points at the same family with the opposite
/// capability, when the bundle ships both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub supports_digraphs: bool,
    pub digraph_twin: Option<&'static str>,
}

const fn font(
    id: &'static str,
    display_name: &'static str,
    supports_digraphs: bool,
    digraph_twin: Option<&'static str>,
) -> FontDescriptor {
    FontDescriptor { id, display_name, supports_digraphs, digraph_twin }
}

pub const DEFAULT_FONT_ID: &str = "AurebeshBasicDigraph";

pub static FONTS: [FontDescriptor; 10] = [
    font("Aurebesh", "Aurebesh", true, None),
    font("AurebeshCantina", "Cantina", true, None),
    font("AurebeshBasic", "Basic", false, Some("AurebeshBasicDigraph")),
    font("AurebeshBasicDigraph", "Basic (Digraph)", true, Some("AurebeshBasic")),
    font("AurebeshCore", "Core", false, Some("AurebeshCoreDigraph")),
    font("AurebeshCoreDigraph", "Core (Digraph)", true, Some("AurebeshCore")),
    font("AurebeshDroid", "Droid", false, Some("AurebeshDroidDigraph")),
    font("AurebeshDroidDigraph", "Droid (Digraph)", true, Some("AurebeshDroid")),
    font("AurebeshNexus", "Nexus", false, None),
    font("AurebeshPixel", "Pixel", false, None),
];

impl FontDescriptor {
    pub fn lookup(id: &str) -> Option<&'static FontDescriptor> {
        FONTS.iter().find(|f| f.id == id)
    }

    pub fn default_font() -> &'static FontDescriptor {
        // DEFAULT_FONT_ID is always present in FONTS
        Self::lookup(DEFAULT_FONT_ID).unwrap_or(&FONTS[0])
    }

    /// The font to switch to when the digraph preference becomes `digraphs`.
    /// Fonts without a twin stay as they are.
    pub fn with_digraphs(&'static self, digraphs: bool) -> &'static FontDescriptor {
        if self.supports_digraphs == digraphs {
            return self;
        }
        self.digraph_twin
            .and_then(Self::lookup)
            .unwrap_or(self)
    }
}
