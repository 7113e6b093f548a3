// ── Local key/value state ──
//
// The explicit replacement for ambient browser storage. One store is
// constructed per application instance and handed to the favorites and
// session layers; nothing in core touches the filesystem directly.

mod favorites;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

pub use favorites::FavoritesStore;

use crate::error::CoreError;

/// Key holding the opaque session token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized user profile.
pub const USER_KEY: &str = "user";
/// Key holding the JSON array of favorited country codes.
pub const FAVORITES_KEY: &str = "favorites";

/// String-keyed persistent storage.
///
/// Writes are synchronous: once `set` or `remove` returns `Ok`, the value
/// is durable as far as the implementation can tell.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// In-process store. Used by tests and as a fallback when no state file
/// is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(TOKEN_KEY), None);
        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
    }
}
