// File: src/persistence.rs
use crate::error::StoreError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A flat key-value preference store, shared by every process of an app group.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<Value>;

    /// Writes one key. Implementations persist immediately.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Store kept in process memory. Used by tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self { values: values.into_iter().collect() }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten atomically on
/// every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file starts empty; an unreadable
    /// or malformed one is logged and also starts empty, so every key falls
    /// back to its default.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match load_map(&path) {
            Ok(values) => values,
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable preference store {}: {}", path.display(), e);
                Map::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        save_map(&self.values, &self.path)
    }
}

fn load_map(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let values: Map<String, Value> = serde_json::from_reader(reader)?;
    Ok(values)
}

fn save_map(values: &Map<String, Value>, path: &Path) -> Result<(), StoreError> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, values)?;
        writer.flush()?;
    }

    temp_file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("digraph").is_none());
        store.set("digraph", json!(false)).unwrap();
        assert_eq!(store.get("digraph"), Some(json!(false)));
    }

    #[test]
    fn file_store_persists_every_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("group.json");

        let mut store = JsonFileStore::open(&path);
        store.set("accentColor", json!("blue")).unwrap();
        store.set("aurebeshFontSize", json!(30.0)).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("accentColor"), Some(json!("blue")));
        assert_eq!(reopened.get("aurebeshFontSize"), Some(json!(30.0)));
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("group.json");
        let mut store = JsonFileStore::open(&path);
        store.set("hapticOn", json!(true)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("group.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.get("digraph").is_none());
    }
}
