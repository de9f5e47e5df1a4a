use aurebesh_core::core::alphabet;
use aurebesh_core::core::fonts::FONTS;
use aurebesh_core::core::keyboard::{self, KeyboardMode};
use aurebesh_core::{AccentColor, AppConfig, InputText, PreferencesService};
use crossterm::style::{Color, Stylize};
use crossterm::{cursor, execute, terminal};
use std::io::{stdin, stdout, Write};

fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = AppConfig::from_env();
    let mut prefs = config.preferences();
    let mut input = InputText::new();
    let mut mode = KeyboardMode::Normal;
    let mut show_english = false;

    if prefs.get().first_launch {
        println!("Welcome to the Aurebesh translator. Type ':help' for commands.");
        prefs.complete_first_launch();
    }

    loop {
        print_ui(&prefs, &input, mode, show_english)?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            break;
        }
        let cmd = line.trim_end_matches(['\r', '\n']);

        match cmd {
            "exit" | ":q" => break,
            ":del" => {
                input.delete_last();
            }
            ":ac" => input.clear(),
            ":space" => input.press_space(),
            ":mode" => mode = mode.next(prefs.transliterator().digraphs_active()),
            ":english" => show_english = !show_english,
            ":help" => {
                print_help();
                wait_for_enter()?;
            }
            s if s.starts_with(":key ") => {
                input.press_key(&s[5..]);
            }
            s if s.starts_with(":digraph ") => {
                prefs.set_digraph(matches!(&s[9..], "on" | "true" | "1"));
            }
            s if s.starts_with(":font ") => {
                prefs.set_font(s[6..].trim());
            }
            s if s.starts_with(":size ") => match s[6..].trim().parse::<f64>() {
                Ok(size) => {
                    prefs.set_font_size(size);
                }
                Err(_) => eprintln!("Not a size: {}", &s[6..]),
            },
            s if s.starts_with(":color ") => match s[7..].trim().parse::<AccentColor>() {
                Ok(color) => {
                    prefs.set_accent_color(color);
                }
                Err(_) => eprintln!("Unknown color: {}", &s[7..]),
            },
            s if s.starts_with(":search ") => {
                for letter in alphabet::search(&s[8..]) {
                    println!("  {:<18} {:<3} {}", letter.name, letter.symbol, letter.category);
                }
                wait_for_enter()?;
            }
            s => input.push_str(s),
        }

        mode = mode.reconcile(prefs.transliterator().digraphs_active());
    }

    println!("\nPreferences saved to '{}'", config.store_path().display());
    Ok(())
}

fn print_ui(
    prefs: &PreferencesService,
    input: &InputText,
    mode: KeyboardMode,
    show_english: bool,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;

    let p = prefs.get();
    let translit = prefs.transliterator();
    let (r, g, b) = p.accent_color.rgb();
    let accent = Color::Rgb { r, g, b };

    println!("Aurebesh Translator");
    println!("---------------------------------------------------------------");
    println!(
        "Font: {}  Size: {}  Digraphs: {}",
        p.font,
        p.font_size as i64,
        if translit.digraphs_active() { "on" } else { "off" }
    );

    let glyphs = if input.is_empty() {
        "aurebesh".to_string()
    } else {
        translit.font_text(input.as_str())
    };
    let english = if input.is_empty() {
        "ENGLISH".to_string()
    } else {
        translit.english_text(input.as_str())
    };
    println!("\nGlyph text : {}", glyphs.with(accent));
    println!("English    : {}", english);

    let captions: Vec<String> = mode
        .keys()
        .iter()
        .map(|k| keyboard::caption(k, mode, show_english, &translit))
        .collect();
    println!("\n[{}] {}", mode, captions.join(" "));
    print!("\n> ");
    out.flush()
}

fn print_help() {
    println!("Type text and press [Enter] to append it.");
    println!("  :key K          press keyboard key K (Delete, AC, ch, ...)");
    println!("  :space :del :ac edit the input");
    println!("  :mode           cycle NORMAL / DIGRAPH / SPECIAL");
    println!("  :english        toggle English key captions");
    println!("  :digraph on|off :font ID :size N :color NAME");
    println!("  :search TEXT    search the alphabet");
    println!("  exit            quit");
    println!("\nFonts:");
    for f in FONTS.iter() {
        println!("  {:<22} digraphs: {}", f.id, f.supports_digraphs);
    }
}

fn wait_for_enter() -> std::io::Result<()> {
    print!("\n[Enter] to continue");
    stdout().flush()?;
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(())
}
