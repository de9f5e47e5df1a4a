// File: src/preferences.rs
use crate::core::digraph::Transliterator;
use crate::core::fonts::{FontDescriptor, DEFAULT_FONT_ID};
use crate::persistence::PreferenceStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub const FONT_SIZE_MIN: f64 = 15.0;
pub const FONT_SIZE_MAX: f64 = 50.0;

/// Point size of the platform's body text style, used to derive font sizes
/// when following the system size.
pub const SYSTEM_BODY_POINT_SIZE: f64 = 17.0;

/// Store keys. Shared with the companion app, so they must not change.
pub mod keys {
    pub const ACCENT_COLOR: &str = "accentColor";
    pub const DIGRAPH: &str = "digraph";
    pub const FONT: &str = "aurebeshFont";
    pub const FONT_SIZE: &str = "aurebeshFontSize";
    pub const USE_SYSTEM_FONT_SIZE: &str = "useSystemFontSize";
    pub const COLOR_SCHEME: &str = "colorSchemeString";
    pub const HAPTICS: &str = "hapticOn";
    pub const TRANSLATING_TO_AUREBESH: &str = "translatingToAurebesh";
    pub const FIRST_LAUNCH: &str = "firstLaunch";
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccentColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Cyan,
    Teal,
    Mint,
    Purple,
    Pink,
    Brown,
    #[default]
    Gold,
}

impl AccentColor {
    /// sRGB components. Gold is the only color not taken from the system palette.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            AccentColor::Red => (255, 59, 48),
            AccentColor::Orange => (255, 149, 0),
            AccentColor::Yellow => (255, 204, 0),
            AccentColor::Green => (52, 199, 89),
            AccentColor::Blue => (0, 122, 255),
            AccentColor::Indigo => (88, 86, 214),
            AccentColor::Cyan => (50, 173, 230),
            AccentColor::Teal => (48, 176, 199),
            AccentColor::Mint => (0, 199, 190),
            AccentColor::Purple => (175, 82, 222),
            AccentColor::Pink => (255, 45, 85),
            AccentColor::Brown => (162, 132, 94),
            AccentColor::Gold => (188, 157, 57),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    System,
    Light,
    Dark,
}

/// The user's preferences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    pub accent_color: AccentColor,
    pub digraph: bool,
    pub font: String,
    pub font_size: f64,
    pub use_system_font_size: bool,
    pub color_scheme: ColorScheme,
    pub haptics: bool,
    pub translating_to_aurebesh: bool,
    pub first_launch: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            accent_color: AccentColor::Gold,
            digraph: true,
            font: DEFAULT_FONT_ID.to_string(),
            font_size: clamp_font_size(SYSTEM_BODY_POINT_SIZE * 1.6),
            use_system_font_size: true,
            color_scheme: ColorScheme::System,
            haptics: true,
            translating_to_aurebesh: false,
            first_launch: true,
        }
    }
}

impl Preferences {
    /// Reads every key from `store`, falling back to the default for keys that
    /// are missing or hold a value of the wrong shape.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        Self {
            accent_color: read_enum(store, keys::ACCENT_COLOR, defaults.accent_color),
            digraph: read_bool(store, keys::DIGRAPH, defaults.digraph),
            font: read_font(store, defaults.font),
            font_size: read_font_size(store, keys::FONT_SIZE, defaults.font_size),
            use_system_font_size: read_bool(
                store,
                keys::USE_SYSTEM_FONT_SIZE,
                defaults.use_system_font_size,
            ),
            color_scheme: read_enum(store, keys::COLOR_SCHEME, defaults.color_scheme),
            haptics: read_bool(store, keys::HAPTICS, defaults.haptics),
            translating_to_aurebesh: read_bool(
                store,
                keys::TRANSLATING_TO_AUREBESH,
                defaults.translating_to_aurebesh,
            ),
            first_launch: read_bool(store, keys::FIRST_LAUNCH, defaults.first_launch),
        }
    }

    pub fn font_descriptor(&self) -> &'static FontDescriptor {
        FontDescriptor::lookup(&self.font).unwrap_or_else(FontDescriptor::default_font)
    }

    pub fn transliterator(&self) -> Transliterator {
        Transliterator::new(self.digraph, self.font_descriptor())
    }
}

pub fn clamp_font_size(size: f64) -> f64 {
    if size.is_nan() {
        return FONT_SIZE_MIN;
    }
    size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
}

/// Size the translation pane uses while following the system text size.
pub fn system_font_size() -> f64 {
    clamp_font_size(SYSTEM_BODY_POINT_SIZE * 1.5)
}

fn read_bool(store: &dyn PreferenceStore, key: &str, default: bool) -> bool {
    match store.get(key) {
        Some(Value::Bool(b)) => b,
        None => default,
        Some(other) => {
            log::warn!("Preference '{}' has unexpected value {}, using default", key, other);
            default
        }
    }
}

fn read_font_size(store: &dyn PreferenceStore, key: &str, default: f64) -> f64 {
    match store.get(key) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => clamp_font_size(v),
            None => default,
        },
        None => default,
        Some(other) => {
            log::warn!("Preference '{}' has unexpected value {}, using default", key, other);
            default
        }
    }
}

fn read_enum<T: FromStr + Copy>(store: &dyn PreferenceStore, key: &str, default: T) -> T {
    match store.get(key) {
        Some(Value::String(s)) => s.parse().unwrap_or_else(|_| {
            log::warn!("Preference '{}' has unknown value '{}', using default", key, s);
            default
        }),
        None => default,
        Some(other) => {
            log::warn!("Preference '{}' has unexpected value {}, using default", key, other);
            default
        }
    }
}

fn read_font(store: &dyn PreferenceStore, default: String) -> String {
    match store.get(keys::FONT) {
        Some(Value::String(id)) if FontDescriptor::lookup(&id).is_some() => id,
        None => default,
        Some(other) => {
            log::warn!("Preference '{}' names an unknown font {}, using default", keys::FONT, other);
            default
        }
    }
}

/// A preference field that changed. Only accent color and digraph travel to
/// the companion device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Change {
    AccentColor,
    Digraph,
    Font,
    FontSize,
    UseSystemFontSize,
    ColorScheme,
    Haptics,
    TranslatingToAurebesh,
    FirstLaunch,
}

impl Change {
    pub fn is_synced(self) -> bool {
        matches!(self, Change::AccentColor | Change::Digraph)
    }
}

/// Owns the preferences of one process and writes every change through to
/// the injected store.
pub struct PreferencesService {
    prefs: Preferences,
    store: Box<dyn PreferenceStore>,
    follow_digraph_font: bool,
}

impl PreferencesService {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let prefs = Preferences::load(&*store);
        Self { prefs, store, follow_digraph_font: false }
    }

    /// When set, toggling digraphs also swaps the font to its digraph twin.
    pub fn follow_digraph_font(mut self, follow: bool) -> Self {
        self.follow_digraph_font = follow;
        self
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    pub fn snapshot(&self) -> Preferences {
        self.prefs.clone()
    }

    pub fn transliterator(&self) -> Transliterator {
        self.prefs.transliterator()
    }

    fn persist(&mut self, key: &str, value: Value) {
        if let Err(e) = self.store.set(key, value) {
            log::error!("Failed to persist preference '{}': {}", key, e);
        }
    }

    pub fn set_accent_color(&mut self, color: AccentColor) -> Vec<Change> {
        if self.prefs.accent_color == color {
            return vec![];
        }
        self.prefs.accent_color = color;
        self.persist(keys::ACCENT_COLOR, Value::from(color.to_string()));
        vec![Change::AccentColor]
    }

    pub fn set_digraph(&mut self, on: bool) -> Vec<Change> {
        if self.prefs.digraph == on {
            return vec![];
        }
        self.prefs.digraph = on;
        self.persist(keys::DIGRAPH, Value::Bool(on));

        let mut changes = vec![Change::Digraph];
        if self.follow_digraph_font {
            let twin = self.prefs.font_descriptor().with_digraphs(on);
            changes.extend(self.set_font(twin.id));
        }
        changes
    }

    /// Unknown font ids are rejected and logged.
    pub fn set_font(&mut self, id: &str) -> Vec<Change> {
        if FontDescriptor::lookup(id).is_none() {
            log::warn!("Ignoring unknown font '{}'", id);
            return vec![];
        }
        if self.prefs.font == id {
            return vec![];
        }
        self.prefs.font = id.to_string();
        self.persist(keys::FONT, Value::from(id));
        vec![Change::Font]
    }

    /// Sets the glyph font size, clamped to the supported range. Landing on the
    /// system size turns `use_system_font_size` on, anything else turns it off.
    pub fn set_font_size(&mut self, size: f64) -> Vec<Change> {
        let size = clamp_font_size(size);
        let mut changes = Vec::new();
        if self.prefs.font_size != size {
            self.prefs.font_size = size;
            self.persist(keys::FONT_SIZE, Value::from(size));
            changes.push(Change::FontSize);
        }
        let follows_system = size == system_font_size();
        if self.prefs.use_system_font_size != follows_system {
            self.prefs.use_system_font_size = follows_system;
            self.persist(keys::USE_SYSTEM_FONT_SIZE, Value::Bool(follows_system));
            changes.push(Change::UseSystemFontSize);
        }
        changes
    }

    pub fn set_use_system_font_size(&mut self, on: bool) -> Vec<Change> {
        let mut changes = Vec::new();
        if self.prefs.use_system_font_size != on {
            self.prefs.use_system_font_size = on;
            self.persist(keys::USE_SYSTEM_FONT_SIZE, Value::Bool(on));
            changes.push(Change::UseSystemFontSize);
        }
        if on {
            changes.extend(self.set_font_size(system_font_size()));
        }
        changes
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) -> Vec<Change> {
        if self.prefs.color_scheme == scheme {
            return vec![];
        }
        self.prefs.color_scheme = scheme;
        self.persist(keys::COLOR_SCHEME, Value::from(scheme.to_string()));
        vec![Change::ColorScheme]
    }

    pub fn set_haptics(&mut self, on: bool) -> Vec<Change> {
        if self.prefs.haptics == on {
            return vec![];
        }
        self.prefs.haptics = on;
        self.persist(keys::HAPTICS, Value::Bool(on));
        vec![Change::Haptics]
    }

    pub fn set_translating_to_aurebesh(&mut self, on: bool) -> Vec<Change> {
        if self.prefs.translating_to_aurebesh == on {
            return vec![];
        }
        self.prefs.translating_to_aurebesh = on;
        self.persist(keys::TRANSLATING_TO_AUREBESH, Value::Bool(on));
        vec![Change::TranslatingToAurebesh]
    }

    pub fn complete_first_launch(&mut self) -> Vec<Change> {
        if !self.prefs.first_launch {
            return vec![];
        }
        self.prefs.first_launch = false;
        self.persist(keys::FIRST_LAUNCH, Value::Bool(false));
        vec![Change::FirstLaunch]
    }
}
