// ── Favorites ──

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, warn};

use super::{FAVORITES_KEY, KeyValueStore};
use crate::error::CoreError;

/// Bookmarked country codes, kept in insertion order.
///
/// Read once at construction. Every `toggle` rewrites the full set before
/// returning, so memory and storage never disagree.
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    codes: IndexSet<String>,
}

impl FavoritesStore {
    /// Load favorites from `store`. Absent or malformed data yields an
    /// empty set.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let codes = match store.get(FAVORITES_KEY) {
            None => IndexSet::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list.into_iter().map(|c| normalize(&c)).collect(),
                Err(e) => {
                    warn!(error = %e, "ignoring malformed favorites");
                    IndexSet::new()
                }
            },
        };
        debug!(count = codes.len(), "favorites loaded");
        Self { store, codes }
    }

    /// Current favorites.
    pub fn get(&self) -> &IndexSet<String> {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&normalize(code))
    }

    /// Favorited codes in insertion order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Add or remove `code`, then persist. Returns the new membership.
    ///
    /// On a failed write the in-memory change is undone and the error
    /// returned.
    pub fn toggle(&mut self, code: &str) -> Result<bool, CoreError> {
        let code = normalize(code);
        let removed_at = self.codes.shift_remove_full(&code).map(|(idx, _)| idx);
        let added = removed_at.is_none();
        if added {
            self.codes.insert(code.clone());
        }

        if let Err(e) = self.persist() {
            match removed_at {
                Some(idx) => {
                    self.codes.shift_insert(idx, code);
                }
                None => {
                    self.codes.shift_remove(&code);
                }
            }
            warn!(error = %e, "favorites write failed, change rolled back");
            return Err(e);
        }

        debug!(%code, added, "favorite toggled");
        Ok(added)
    }

    fn persist(&self) -> Result<(), CoreError> {
        let codes: Vec<&String> = self.codes.iter().collect();
        let json = serde_json::to_string(&codes).map_err(|e| CoreError::Storage {
            message: e.to_string(),
        })?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    /// Accepts reads, rejects every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            Some(r#"["DEU"]"#.to_owned())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage {
                message: "read-only".into(),
            })
        }
        fn remove(&self, _key: &str) -> Result<(), CoreError> {
            Ok(())
        }
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut favorites = FavoritesStore::load(Arc::clone(&store));
        assert!(favorites.is_empty());

        assert!(favorites.toggle("FRA").unwrap());
        assert!(favorites.contains("FRA"));
        assert_eq!(store.get(FAVORITES_KEY).as_deref(), Some(r#"["FRA"]"#));

        assert!(!favorites.toggle("FRA").unwrap());
        assert!(favorites.is_empty());
        assert_eq!(store.get(FAVORITES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn reload_sees_persisted_set_in_insertion_order() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut favorites = FavoritesStore::load(Arc::clone(&store));
        favorites.toggle("jpn").unwrap();
        favorites.toggle("BRA").unwrap();

        let reloaded = FavoritesStore::load(store);
        assert_eq!(reloaded.codes().collect::<Vec<_>>(), ["JPN", "BRA"]);
    }

    #[test]
    fn malformed_favorites_load_as_empty() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json").unwrap();
        let favorites = FavoritesStore::load(Arc::new(store));
        assert!(favorites.is_empty());
    }

    #[test]
    fn failed_write_rolls_back() {
        let mut favorites = FavoritesStore::load(Arc::new(ReadOnlyStore));
        assert!(favorites.contains("DEU"));

        assert!(favorites.toggle("FRA").is_err());
        assert!(!favorites.contains("FRA"));

        assert!(favorites.toggle("DEU").is_err());
        assert!(favorites.contains("DEU"));
    }
}
