// File: src/sync/payload.rs
use crate::preferences::{keys, AccentColor, Preferences};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the synced subset travels inside a message.
pub const SETTINGS_KEY: &str = "settings";

/// The preferences both devices keep in step.
///
/// On the wire this is a flat map, `{"accentColor": "blue", "digraph": true}`.
/// Fields are optional on receipt so a peer can send a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPayload {
    #[serde(rename = "accentColor", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<AccentColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digraph: Option<bool>,
}

impl SyncPayload {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            accent_color: Some(prefs.accent_color),
            digraph: Some(prefs.digraph),
        }
    }

    /// Reads the recognized keys out of a loosely-typed map. Unknown keys and
    /// values of the wrong type are skipped.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let accent_color = match map.get(keys::ACCENT_COLOR) {
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        };
        let digraph = match map.get(keys::DIGRAPH) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        };
        Self { accent_color, digraph }
    }

    pub fn is_empty(&self) -> bool {
        self.accent_color.is_none() && self.digraph.is_none()
    }
}

/// The message exchanged between peers: `{"settings": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub settings: SyncPayload,
}

impl Envelope {
    pub fn new(settings: SyncPayload) -> Self {
        Self { settings }
    }

    /// Serialized form, used both for sending and for deduplication.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Extracts the settings from a raw message. Messages without a
    /// `settings` object yield `None`.
    pub fn from_message(message: &Value) -> Option<Self> {
        let settings = message.get(SETTINGS_KEY)?.as_object()?;
        Some(Self::new(SyncPayload::from_map(settings)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let message: Value = serde_json::from_slice(bytes).ok()?;
        Self::from_message(&message)
    }
}
