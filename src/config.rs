// File: src/config.rs
use crate::persistence::JsonFileStore;
use crate::preferences::PreferencesService;
use crate::sync::debounce::DEFAULT_DEBOUNCE;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use strum_macros::{Display, EnumString};

pub const DEFAULT_GROUP: &str = "group.com.Datapad.AppGroup";
const APP_DIR: &str = "datapad-aurebesh";

/// Which side of the pair this process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    #[default]
    Phone,
    Watch,
}

/// Process configuration.
///
/// Every field can be overridden from the environment:
/// `AUREBESH_GROUP`, `AUREBESH_STORE`, `AUREBESH_DEBOUNCE_MS`, `AUREBESH_PLATFORM`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub group: String,
    pub store_path: Option<PathBuf>,
    pub debounce: Duration,
    pub platform: Platform,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP.to_string(),
            store_path: None,
            debounce: DEFAULT_DEBOUNCE,
            platform: Platform::Phone,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(group) = env::var("AUREBESH_GROUP") {
            config.group = group;
        }
        if let Ok(path) = env::var("AUREBESH_STORE") {
            config.store_path = Some(PathBuf::from(path));
        }
        if let Ok(ms) = env::var("AUREBESH_DEBOUNCE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => config.debounce = Duration::from_millis(ms),
                Err(_) => log::warn!("Ignoring invalid AUREBESH_DEBOUNCE_MS '{}'", ms),
            }
        }
        if let Ok(platform) = env::var("AUREBESH_PLATFORM") {
            match platform.parse() {
                Ok(p) => config.platform = p,
                Err(_) => log::warn!("Ignoring unknown AUREBESH_PLATFORM '{}'", platform),
            }
        }
        config
    }

    /// The store file shared by every process in the app group.
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(format!("{}.json", self.group));
        path
    }

    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::open(self.store_path())
    }

    /// Preferences for this process. On the watch, toggling digraphs also
    /// swaps to the matching font variant.
    pub fn preferences(&self) -> PreferencesService {
        PreferencesService::new(Box::new(self.open_store()))
            .follow_digraph_font(self.platform == Platform::Watch)
    }
}
