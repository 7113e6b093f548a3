// ── On-disk key/value state ──
//
// `state.json` is a flat JSON object. Values that are themselves JSON
// (the favorites array, the user profile) are stored inline so the file
// stays readable; everything else is stored as a string. The whole file
// is rewritten on every change, last write wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tracing::{debug, warn};

use terra_core::{CoreError, KeyValueStore};

use crate::ConfigError;

/// `KeyValueStore` backed by a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl FileStore {
    /// Open `path`, reading existing state. A missing file starts empty;
    /// an unreadable or malformed one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, Value>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed state file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read state file");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "state loaded");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, Value>) -> Result<(), ConfigError> {
        let state_err = |reason: String| ConfigError::State {
            path: self.path.clone(),
            reason,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|e| state_err(e.to_string()))?;

        // Write beside the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, Value>),
    ) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        apply(&mut next);
        self.write(&next).map_err(|e| CoreError::Storage {
            message: e.to_string(),
        })?;
        *entries = next;
        Ok(())
    }
}

fn encode(value: &str) -> Value {
    match serde_json::from_str::<Value>(value) {
        Ok(parsed) if parsed.is_array() || parsed.is_object() => parsed,
        _ => Value::String(value.to_owned()),
    }
}

fn decode(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(decode)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), encode(value));
        })
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use terra_core::FavoritesStore;

    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        store.set("token", "abc.def").unwrap();
        store.set("favorites", r#"["FRA","DEU"]"#).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("token").as_deref(), Some("abc.def"));
        assert_eq!(reopened.get("favorites").as_deref(), Some(r#"["FRA","DEU"]"#));

        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["favorites"][1], "DEU");
    }

    #[test]
    fn scalar_looking_strings_stay_strings() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json"));
        store.set("token", "12345").unwrap();
        store.set("quoted", "\"x\"").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("12345"));
        assert_eq!(store.get("quoted").as_deref(), Some("\"x\""));
    }

    #[test]
    fn remove_deletes_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStore::open(&path);
        store.set("token", "t").unwrap();
        store.remove("token").unwrap();
        assert_eq!(FileStore::open(&path).get("token"), None);
    }

    #[test]
    fn malformed_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{{{{").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("favorites"), None);
        let favorites = FavoritesStore::load(Arc::new(store));
        assert!(favorites.is_empty());
    }

    #[test]
    fn failed_write_keeps_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("state.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let store = FileStore::open(&path);
        assert!(store.set("token", "t").is_err());
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn favorites_persist_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut favorites = FavoritesStore::load(Arc::new(FileStore::open(&path)));
        favorites.toggle("fra").unwrap();

        let reloaded = FavoritesStore::load(Arc::new(FileStore::open(&path)));
        assert!(reloaded.contains("FRA"));
    }
}
