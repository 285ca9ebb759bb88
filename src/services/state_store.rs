//! Client-local key/value storage.
//!
//! The tab editor and the shell state mirror themselves here after every
//! mutation and read it back on startup. [`FileStateStore`] keeps one JSON
//! object on disk; [`MemoryStateStore`] is the in-process equivalent.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::types::errors::StorageError;
use crate::types::tab::{Tab, TabSetState, MAX_TABS};

/// Key holding the JSON array of tabs.
pub const TABS_KEY: &str = "tabs";
/// Key holding the active tab id.
pub const ACTIVE_TAB_KEY: &str = "activeTab";
/// Key holding the theme mode.
pub const THEME_KEY: &str = "theme";
/// Key holding the last visited navigation entry.
pub const LAST_VISITED_KEY: &str = "lastVisitedTab";

/// Storage port for durable client-local state.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// State store persisted as a single JSON object file.
///
/// Every write rewrites the whole file through a temp file + rename so a
/// crash never leaves a half-written document behind.
pub struct FileStateStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStateStore {
    /// Opens the store at `path`. A missing file starts empty. A file that
    /// cannot be read or parsed is discarded with a warning and replaced on
    /// the next write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                    Ok(map) => map,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "discarding unparsable state file");
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable state file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::IoError(format!("Failed to create state directory: {}", e))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .map_err(|e| StorageError::IoError(format!("Failed to write state file: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StorageError::IoError(format!("Failed to replace state file: {}", e)))?;
        debug!(path = %self.path.display(), keys = entries.len(), "state file written");
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::IoError(format!("state store lock poisoned: {}", e)))
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// In-memory state store.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Reads the mirrored tab set.
///
/// Returns `Ok(None)` when nothing has been stored yet and
/// `StorageError::MalformedStoredState` when the stored tabs are not a
/// non-empty array of at most [`MAX_TABS`] tabs. The active id is returned as
/// stored; callers validate it against the tabs.
pub fn load_tab_set(store: &dyn StateStore) -> Result<Option<TabSetState>, StorageError> {
    let raw = match store.get(TABS_KEY)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let tabs: Vec<Tab> = serde_json::from_str(&raw)
        .map_err(|e| StorageError::MalformedStoredState(e.to_string()))?;
    if tabs.is_empty() {
        return Err(StorageError::MalformedStoredState(
            "stored tab list is empty".to_string(),
        ));
    }
    if tabs.len() > MAX_TABS {
        return Err(StorageError::MalformedStoredState(format!(
            "stored tab list has {} tabs (max {})",
            tabs.len(),
            MAX_TABS
        )));
    }
    let active_tab_id = store.get(ACTIVE_TAB_KEY)?.unwrap_or_default();
    Ok(Some(TabSetState {
        tabs,
        active_tab_id,
    }))
}

/// Writes the tab list and the active id.
pub fn save_tab_set(store: &dyn StateStore, state: &TabSetState) -> Result<(), StorageError> {
    let json = serde_json::to_string(&state.tabs)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    store.set(TABS_KEY, &json)?;
    store.set(ACTIVE_TAB_KEY, &state.active_tab_id)
}
