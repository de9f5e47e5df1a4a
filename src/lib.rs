// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod preferences;
pub mod sync;

pub use crate::config::{AppConfig, Platform};
pub use crate::core::digraph::{DigraphRewriter, Transliterator};
pub use crate::core::fonts::FontDescriptor;
pub use crate::core::input::InputText;
pub use crate::core::keyboard::KeyboardMode;
pub use crate::core::types::{DigraphEntry, LetterCategory, LetterEntry};
pub use crate::error::{StoreError, TransportError};
pub use crate::persistence::{JsonFileStore, MemoryStore, PreferenceStore};
pub use crate::preferences::{AccentColor, Change, ColorScheme, Preferences, PreferencesService};
pub use crate::sync::mirror::{SendOutcome, SettingsMirror, SharedPreferences};
pub use crate::sync::worker::MirrorWorker;
