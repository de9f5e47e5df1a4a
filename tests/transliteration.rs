// End-to-end checks of the translator pipeline: preferences pick the font,
// the font decides whether digraphs apply, the input buffer feeds both panes.

use aurebesh_core::core::keyboard::{self, KeyboardMode, DELETE_KEY};
use aurebesh_core::{InputText, MemoryStore, PreferencesService};

fn service() -> PreferencesService {
    PreferencesService::new(Box::new(MemoryStore::new()))
}

#[test]
fn typing_the_word_the() {
    let prefs = service();
    let translit = prefs.transliterator();
    let mut input = InputText::new();
    for key in ["t", "h", "e"] {
        input.press_key(key);
    }

    let glyphs = translit.font_text(input.as_str());
    assert_eq!(glyphs.chars().count(), 2);
    assert_eq!(translit.english_text(&glyphs), "THE");
    assert_eq!(translit.english_text(input.as_str()), "THE");
}

#[test]
fn digraph_keys_type_two_letters() {
    let prefs = service();
    let translit = prefs.transliterator();
    let mut input = InputText::new();

    let mode = KeyboardMode::Normal.next(translit.digraphs_active());
    assert_eq!(mode, KeyboardMode::Digraph);
    input.press_key("sh");
    input.press_space();
    input.press_key("ng");
    input.press_key(DELETE_KEY);
    assert_eq!(input.as_str(), "sh n");

    assert_eq!(
        keyboard::caption("sh", mode, false, &translit),
        translit.font_text("sh")
    );
}

#[test]
fn switching_to_plain_font_disables_digraphs() {
    let mut prefs = service();
    prefs.set_font("AurebeshCore");
    let translit = prefs.transliterator();
    assert!(!translit.digraphs_active());
    assert_eq!(translit.font_text("THE"), "the");
    assert_eq!(KeyboardMode::Digraph.reconcile(translit.digraphs_active()), KeyboardMode::Normal);
}

#[test]
fn disabling_digraphs_in_settings() {
    let mut prefs = service();
    prefs.set_digraph(false);
    let translit = prefs.transliterator();
    assert_eq!(translit.encode("Chess"), "Chess");
    assert_eq!(translit.decode("Chess"), "CHESS");
}
